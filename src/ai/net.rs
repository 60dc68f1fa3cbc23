/// Connectivity port. Injected instead of ambient online/offline listeners so
/// the generator can be tested without a real network stack.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Production default: assume the network is reachable and let the retry
/// policy absorb transient failures.
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

#[cfg(test)]
pub struct Offline;

#[cfg(test)]
impl Connectivity for Offline {
    fn is_online(&self) -> bool {
        false
    }
}
