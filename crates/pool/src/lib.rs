//! Bounded pool of sessions to an external document-processing engine.
//!
//! Engine sessions are expensive to open and limited in number, so they
//! are pooled and reused. The pool hands out at most `capacity` sessions
//! at a time; `acquire` blocks until one is free or a configured timeout
//! elapses. Returned handles are RAII guards: dropping a
//! [`PooledSession`] releases the underlying session on every exit path,
//! including panics and early error returns.
//!
//! Reused sessions are health-checked before they are handed out; a dead
//! session is discarded and replaced transparently, so callers never
//! observe a stale connection.

mod config;
mod error;
mod factory;
mod handle;
mod pool;
mod stats;

pub use config::PoolConfig;
pub use error::PoolError;
pub use factory::{EngineSession, SessionFactory};
pub use handle::PooledSession;
pub use pool::SessionPool;
pub use stats::PoolStats;
