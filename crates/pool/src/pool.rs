use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::factory::{EngineSession, SessionFactory};
use crate::handle::PooledSession;
use crate::stats::PoolStats;
use log::{debug, warn};
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Instant;

struct State<S> {
    idle: Vec<S>,
    /// Sessions checked out or currently being opened. The invariant
    /// `idle.len() + borrowed <= capacity` bounds total live sessions.
    borrowed: usize,
    closed: bool,
}

/// A bounded, blocking pool of engine sessions.
///
/// Created once at process start and shared by reference across request
/// threads. Sessions are opened lazily through the factory as demand
/// requires, up to the configured capacity; [`warmup`](Self::warmup)
/// pre-opens them instead. All membership mutation happens under a single
/// mutex; borrowed sessions are used lock-free by their exclusive holder.
pub struct SessionPool<F: SessionFactory> {
    factory: F,
    config: PoolConfig,
    state: Mutex<State<F::Session>>,
    available: Condvar,
}

impl<F: SessionFactory> SessionPool<F> {
    pub fn new(factory: F, config: PoolConfig) -> Self {
        Self {
            factory,
            config,
            state: Mutex::new(State {
                idle: Vec::new(),
                borrowed: 0,
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<F::Session>>, PoolError> {
        self.state.lock().map_err(|_| PoolError::Poisoned)
    }

    /// Pre-opens sessions until the pool is at capacity.
    pub fn warmup(&self) -> Result<(), PoolError> {
        loop {
            {
                let state = self.lock()?;
                if state.closed {
                    return Err(PoolError::Closed);
                }
                if state.idle.len() + state.borrowed >= self.config.capacity {
                    return Ok(());
                }
            }
            // Connect outside the lock; re-check occupancy afterwards in
            // case another thread got there first.
            let mut session = self.factory.connect()?;
            let mut state = self.lock()?;
            if state.closed || state.idle.len() + state.borrowed >= self.config.capacity {
                drop(state);
                session.close();
            } else {
                state.idle.push(session);
                self.available.notify_one();
            }
        }
    }

    /// Borrows a session, blocking until one is free or the configured
    /// timeout elapses.
    ///
    /// Idle sessions are liveness-checked first; a dead one is discarded
    /// and replaced transparently. Fails with [`PoolError::Exhausted`] on
    /// timeout and [`PoolError::Closed`] once the pool has shut down.
    pub fn acquire(&self) -> Result<PooledSession<'_, F>, PoolError> {
        let timeout = self.config.acquire_timeout();
        let deadline = Instant::now() + timeout;
        let mut state = self.lock()?;
        loop {
            if state.closed {
                return Err(PoolError::Closed);
            }

            // Reuse an idle session if a live one exists.
            if let Some(mut session) = state.idle.pop() {
                state.borrowed += 1;
                drop(state);
                if session.ping() {
                    return Ok(PooledSession::new(self, session));
                }
                warn!("discarding dead engine session");
                session.close();
                state = self.lock()?;
                state.borrowed -= 1;
                continue;
            }

            // Nothing idle: open a new session while under capacity.
            if state.borrowed < self.config.capacity {
                state.borrowed += 1;
                drop(state);
                match self.factory.connect() {
                    Ok(session) => {
                        debug!("opened new engine session");
                        return Ok(PooledSession::new(self, session));
                    }
                    Err(err) => {
                        if let Ok(mut state) = self.state.lock() {
                            state.borrowed -= 1;
                        }
                        self.available.notify_one();
                        return Err(err);
                    }
                }
            }

            // At capacity: wait for a release or the deadline.
            let now = Instant::now();
            if now >= deadline {
                return Err(PoolError::Exhausted { waited: timeout });
            }
            let (guard, _) = self
                .available
                .wait_timeout(state, deadline - now)
                .map_err(|_| PoolError::Poisoned)?;
            state = guard;
        }
    }

    /// Returns a session to the pool.
    ///
    /// Called from the handle's `Drop`, so it must not panic. A session
    /// marked defunct, or released after shutdown, is closed instead of
    /// re-pooled. The accounting saturates: a stray release can never
    /// double-count capacity.
    pub(crate) fn release(&self, session: F::Session, defunct: bool) {
        let mut returned = Some(session);
        if let Ok(mut state) = self.state.lock() {
            state.borrowed = state.borrowed.saturating_sub(1);
            if !defunct && !state.closed {
                if let Some(session) = returned.take() {
                    state.idle.push(session);
                }
            }
        }
        self.available.notify_one();
        if let Some(mut session) = returned {
            debug!("closing engine session on release");
            session.close();
        }
    }

    /// Shuts the pool down: closes all idle sessions and wakes any
    /// waiting `acquire` calls, which then fail with
    /// [`PoolError::Closed`]. In-flight sessions are closed as their
    /// holders release them.
    pub fn close(&self) {
        let idle = match self.state.lock() {
            Ok(mut state) => {
                state.closed = true;
                std::mem::take(&mut state.idle)
            }
            Err(_) => Vec::new(),
        };
        self.available.notify_all();
        debug!("closing session pool ({} idle sessions)", idle.len());
        for mut session in idle {
            session.close();
        }
    }

    /// A snapshot of current occupancy. Reports the pool as closed if its
    /// lock is poisoned.
    pub fn stats(&self) -> PoolStats {
        match self.state.lock() {
            Ok(state) => PoolStats {
                idle: state.idle.len(),
                borrowed: state.borrowed,
                capacity: self.config.capacity,
                closed: state.closed,
            },
            Err(_) => PoolStats {
                idle: 0,
                borrowed: 0,
                capacity: self.config.capacity,
                closed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct FakeSession {
        alive: Arc<AtomicBool>,
        closes: Arc<AtomicUsize>,
    }

    impl EngineSession for FakeSession {
        fn ping(&mut self) -> bool {
            self.alive.load(Ordering::SeqCst)
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct FakeFactory {
        connects: AtomicUsize,
        closes: Arc<AtomicUsize>,
        fail: AtomicBool,
        /// Liveness flags handed to sessions, so tests can kill them.
        sessions: Mutex<Vec<Arc<AtomicBool>>>,
    }

    impl FakeFactory {
        fn kill_all(&self) {
            for alive in self.sessions.lock().unwrap().iter() {
                alive.store(false, Ordering::SeqCst);
            }
        }
    }

    impl SessionFactory for FakeFactory {
        type Session = FakeSession;

        fn connect(&self) -> Result<FakeSession, PoolError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PoolError::Connect("engine unreachable".into()));
            }
            self.connects.fetch_add(1, Ordering::SeqCst);
            let alive = Arc::new(AtomicBool::new(true));
            self.sessions.lock().unwrap().push(alive.clone());
            Ok(FakeSession {
                alive,
                closes: self.closes.clone(),
            })
        }
    }

    fn pool(capacity: usize, timeout: Duration) -> SessionPool<FakeFactory> {
        let _ = env_logger::builder().is_test(true).try_init();
        SessionPool::new(FakeFactory::default(), PoolConfig::new(capacity, timeout))
    }

    #[test]
    fn test_acquire_connects_lazily_and_release_repools() {
        let pool = pool(2, Duration::from_millis(100));
        {
            let _session = pool.acquire().unwrap();
            assert_eq!(pool.stats().borrowed, 1);
        }
        let stats = pool.stats();
        assert_eq!(stats.borrowed, 0);
        assert_eq!(stats.idle, 1);

        // A second acquire reuses the idle session instead of connecting.
        let _session = pool.acquire().unwrap();
        assert_eq!(pool.factory.connects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_acquire_times_out_when_exhausted() {
        let pool = pool(1, Duration::from_millis(50));
        let _held = pool.acquire().unwrap();
        let err = pool.acquire().unwrap_err();
        assert!(matches!(err, PoolError::Exhausted { .. }));
    }

    #[test]
    fn test_waiting_acquire_proceeds_after_release() {
        let pool = Arc::new(pool(1, Duration::from_secs(5)));
        let held = pool.acquire().unwrap();

        let waiter = {
            let pool = pool.clone();
            std::thread::spawn(move || {
                let _session = pool.acquire().unwrap();
            })
        };
        std::thread::sleep(Duration::from_millis(20));
        drop(held);
        waiter.join().unwrap();
        assert_eq!(pool.stats().borrowed, 0);
    }

    #[test]
    fn test_at_most_capacity_sessions_borrowed_concurrently() {
        let pool = Arc::new(pool(3, Duration::from_secs(5)));
        let in_use = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                let in_use = in_use.clone();
                let peak = peak.clone();
                std::thread::spawn(move || {
                    let _session = pool.acquire().unwrap();
                    let now = in_use.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(10));
                    in_use.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(pool.factory.connects.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_dead_idle_session_is_replaced_transparently() {
        let pool = pool(2, Duration::from_millis(100));
        drop(pool.acquire().unwrap());
        assert_eq!(pool.stats().idle, 1);

        pool.factory.kill_all();
        let _session = pool.acquire().unwrap();
        // The stale session was closed and a fresh one opened.
        assert_eq!(pool.factory.connects.load(Ordering::SeqCst), 2);
        assert_eq!(pool.factory.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidated_session_is_closed_not_repooled() {
        let pool = pool(1, Duration::from_millis(100));
        {
            let mut session = pool.acquire().unwrap();
            session.invalidate();
        }
        let stats = pool.stats();
        assert_eq!(stats.idle, 0);
        assert_eq!(pool.factory.closes.load(Ordering::SeqCst), 1);

        // Capacity was freed: the next acquire opens a replacement.
        let _session = pool.acquire().unwrap();
        assert_eq!(pool.factory.connects.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_connect_failure_frees_capacity() {
        let pool = pool(1, Duration::from_millis(100));
        pool.factory.fail.store(true, Ordering::SeqCst);
        assert!(matches!(pool.acquire(), Err(PoolError::Connect(_))));

        pool.factory.fail.store(false, Ordering::SeqCst);
        let _session = pool.acquire().unwrap();
    }

    #[test]
    fn test_close_rejects_new_acquires_and_closes_idle() {
        let pool = pool(2, Duration::from_millis(100));
        drop(pool.acquire().unwrap());
        assert_eq!(pool.stats().idle, 1);

        pool.close();
        assert!(matches!(pool.acquire(), Err(PoolError::Closed)));
        assert_eq!(pool.factory.closes.load(Ordering::SeqCst), 1);
        assert!(pool.stats().closed);
    }

    #[test]
    fn test_close_wakes_blocked_acquire() {
        let pool = Arc::new(pool(1, Duration::from_secs(5)));
        let _held = pool.acquire().unwrap();
        let waiter = {
            let pool = pool.clone();
            std::thread::spawn(move || pool.acquire().map(|_| ()))
        };
        std::thread::sleep(Duration::from_millis(20));
        pool.close();
        assert!(matches!(waiter.join().unwrap(), Err(PoolError::Closed)));
    }

    #[test]
    fn test_session_released_after_close_is_closed() {
        let pool = pool(1, Duration::from_millis(100));
        let session = pool.acquire().unwrap();
        pool.close();
        drop(session);
        assert_eq!(pool.factory.closes.load(Ordering::SeqCst), 1);
        assert_eq!(pool.stats().idle, 0);
    }

    #[test]
    fn test_warmup_fills_pool_to_capacity() {
        let pool = pool(3, Duration::from_millis(100));
        pool.warmup().unwrap();
        let stats = pool.stats();
        assert_eq!(stats.idle, 3);
        assert_eq!(pool.factory.connects.load(Ordering::SeqCst), 3);

        // Warmup again is a no-op.
        pool.warmup().unwrap();
        assert_eq!(pool.factory.connects.load(Ordering::SeqCst), 3);
    }
}
