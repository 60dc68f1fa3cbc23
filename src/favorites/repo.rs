use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Join row between a user and a persisted snack. Identity is the pair;
/// rows are created and deleted, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub user_id: Uuid,
    pub snack_id: i64,
    pub added_at: OffsetDateTime,
}

/// Favorite with the snack summary columns joined in, for list responses.
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteWithSnack {
    pub user_id: Uuid,
    pub snack_id: i64,
    pub added_at: OffsetDateTime,
    pub title: String,
    pub description: String,
    pub kcal: f64,
}

pub async fn list_page(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<FavoriteWithSnack>> {
    let rows = sqlx::query_as::<_, FavoriteWithSnack>(
        r#"
        SELECT f.user_id, f.snack_id, f.added_at, s.title, s.description, s.kcal
        FROM user_favourites f
        JOIN snacks s ON s.id = f.snack_id
        WHERE f.user_id = $1
        ORDER BY f.added_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_favourites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;
    Ok(total)
}

/// All of a user's favorites. The synthetic composite id cannot be reversed,
/// so detail and delete lookups scan this list for the matching pair.
pub async fn list_all(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Favorite>> {
    let rows = sqlx::query_as::<_, Favorite>(
        r#"
        SELECT user_id, snack_id, added_at
        FROM user_favourites
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn exists(db: &PgPool, user_id: Uuid, snack_id: i64) -> anyhow::Result<bool> {
    let found: Option<i32> = sqlx::query_scalar(
        "SELECT 1 FROM user_favourites WHERE user_id = $1 AND snack_id = $2",
    )
    .bind(user_id)
    .bind(snack_id)
    .fetch_optional(db)
    .await?;
    Ok(found.is_some())
}

pub async fn insert(db: &PgPool, user_id: Uuid, snack_id: i64) -> anyhow::Result<Favorite> {
    let row = sqlx::query_as::<_, Favorite>(
        r#"
        INSERT INTO user_favourites (user_id, snack_id)
        VALUES ($1, $2)
        RETURNING user_id, snack_id, added_at
        "#,
    )
    .bind(user_id)
    .bind(snack_id)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, snack_id: i64) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM user_favourites WHERE user_id = $1 AND snack_id = $2")
        .bind(user_id)
        .bind(snack_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
