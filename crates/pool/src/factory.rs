use crate::PoolError;

/// One live session to the external engine.
///
/// Implementations wrap whatever transport the engine speaks (a UNO
/// bridge, a local socket). The pool owns sessions except during the
/// window between acquire and release, when the borrowing caller has
/// exclusive use.
pub trait EngineSession: Send {
    /// Lightweight liveness check, run before a pooled session is reused.
    fn ping(&mut self) -> bool;

    /// Terminates the session. The pool calls this at most once.
    fn close(&mut self);
}

/// Opens new engine sessions on behalf of the pool.
pub trait SessionFactory: Send + Sync {
    type Session: EngineSession;

    /// Opens a fresh session, failing with [`PoolError::Connect`] if the
    /// engine is unreachable.
    fn connect(&self) -> Result<Self::Session, PoolError>;
}
