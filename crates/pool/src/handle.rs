use crate::factory::SessionFactory;
use crate::pool::SessionPool;
use std::ops::{Deref, DerefMut};

/// A borrowed engine session.
///
/// Dereferences to the underlying session. Dropping the handle returns
/// the session to the pool, or closes it if [`invalidate`] was called
/// or the pool has shut down in the meantime. Because release happens in
/// `Drop`, it runs on every exit path exactly once.
///
/// [`invalidate`]: PooledSession::invalidate
pub struct PooledSession<'p, F: SessionFactory> {
    pool: &'p SessionPool<F>,
    session: Option<F::Session>,
    defunct: bool,
}

impl<'p, F: SessionFactory> PooledSession<'p, F> {
    pub(crate) fn new(pool: &'p SessionPool<F>, session: F::Session) -> Self {
        Self {
            pool,
            session: Some(session),
            defunct: false,
        }
    }

    /// Marks the session unusable. On release it will be closed and
    /// discarded instead of returned to the idle set.
    ///
    /// Call this after the remote engine reports a fatal session error.
    pub fn invalidate(&mut self) {
        self.defunct = true;
    }
}

impl<F: SessionFactory> std::fmt::Debug for PooledSession<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledSession")
            .field("defunct", &self.defunct)
            .finish_non_exhaustive()
    }
}

impl<F: SessionFactory> Deref for PooledSession<'_, F> {
    type Target = F::Session;

    fn deref(&self) -> &Self::Target {
        // Invariant: `session` is Some until Drop takes it.
        self.session.as_ref().expect("session already released")
    }
}

impl<F: SessionFactory> DerefMut for PooledSession<'_, F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session.as_mut().expect("session already released")
    }
}

impl<F: SessionFactory> Drop for PooledSession<'_, F> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.pool.release(session, self.defunct);
        }
    }
}
