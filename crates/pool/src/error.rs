use std::time::Duration;
use thiserror::Error;

/// Error type for pool operations.
#[derive(Error, Debug, Clone)]
pub enum PoolError {
    /// No session became free within the acquire timeout. Transient; the
    /// caller may retry after backoff.
    #[error("timed out after {waited:?} waiting for an engine session")]
    Exhausted { waited: Duration },

    /// The pool has been shut down; no further sessions will be handed
    /// out.
    #[error("session pool is closed")]
    Closed,

    /// The session factory failed to open a connection to the engine.
    #[error("failed to open engine session: {0}")]
    Connect(String),

    /// Internal pool state was poisoned by a panic in another thread.
    #[error("session pool lock poisoned")]
    Poisoned,
}
