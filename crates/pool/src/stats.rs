/// A point-in-time snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Sessions sitting idle, ready for reuse.
    pub idle: usize,
    /// Sessions currently borrowed by callers.
    pub borrowed: usize,
    /// Configured maximum number of sessions.
    pub capacity: usize,
    /// Whether the pool has been shut down.
    pub closed: bool,
}
