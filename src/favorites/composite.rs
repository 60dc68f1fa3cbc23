use uuid::Uuid;

/// Synthetic integer id for a `(user_id, snack_id)` favorite pair, used only
/// for external addressing. Never stored: both the list/detail encoders and
/// the delete-by-id decoder recompute it from the pair.
///
/// The arithmetic (32-bit wraparound multiply-add over the joined string,
/// then absolute value) is kept bit-for-bit stable because clients address
/// favorites by these ids. Collisions are a known limitation.
pub fn composite_id(user_id: &Uuid, snack_id: i64) -> i64 {
    let joined = format!("{user_id}-{snack_id}");
    let mut hash: i32 = 0;
    for unit in joined.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    i64::from(hash).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_the_same_pair() {
        let user = Uuid::new_v4();
        assert_eq!(composite_id(&user, 42), composite_id(&user, 42));
    }

    #[test]
    fn changes_when_either_input_changes() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_ne!(composite_id(&user, 42), composite_id(&user, 43));
        assert_ne!(composite_id(&user, 42), composite_id(&other, 42));
    }

    #[test]
    fn never_negative() {
        let user = Uuid::new_v4();
        for snack_id in 0..200 {
            assert!(composite_id(&user, snack_id) >= 0);
        }
    }

    #[test]
    fn matches_the_reference_hash() {
        // hash("00000000-0000-0000-0000-000000000000-1") computed with the
        // original 32-bit multiply-add scheme.
        let user = Uuid::nil();
        let expected = {
            let mut hash: i32 = 0;
            for c in format!("{user}-1").chars() {
                hash = hash.wrapping_mul(31).wrapping_add(c as i32);
            }
            i64::from(hash).abs()
        };
        assert_eq!(composite_id(&user, 1), expected);
    }
}
