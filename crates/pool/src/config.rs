use serde::Deserialize;
use std::time::Duration;

/// Pool sizing and timeout configuration.
///
/// Typically deserialized from the application's configuration file;
/// defaults suit a small office installation with one engine host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of concurrently open engine sessions.
    pub capacity: usize,
    /// How long an `acquire` call may wait for a free session, in
    /// milliseconds.
    pub acquire_timeout_ms: u64,
}

impl PoolConfig {
    pub fn new(capacity: usize, acquire_timeout: Duration) -> Self {
        Self {
            capacity,
            acquire_timeout_ms: acquire_timeout.as_millis() as u64,
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            acquire_timeout_ms: 30_000,
        }
    }
}
