//! Time sources.
//!
//! Expiration is always evaluated against an explicitly injected clock, never
//! ambient wall-clock time. Production wiring shares one [`LogicalClock`]
//! (advanceable, resettable) across every component that needs time; tests
//! advance it on demand instead of sleeping. [`WallClock`] exists for callers
//! that deliberately want ambient time, e.g. a session window measured
//! against the real world.

use crate::lock::{LockGuard, LockProvider};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Abstracts "what time is it" for testability.
pub trait Clock: Send + Sync {
    /// The current time according to this clock.
    fn now(&self) -> DateTime<Utc>;
}

/// Ambient system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// An advanceable millisecond clock guarded by an injected lock capability.
///
/// Reads never observe a half-applied advance; concurrent advances serialize
/// into a total order. `advance` accepts negative durations without
/// special-casing (the clock can move backward); no validation is performed.
pub struct LogicalClock {
    lock: Arc<dyn LockProvider>,
    millis: AtomicI64,
}

impl LogicalClock {
    /// Creates a clock starting at the current system time.
    #[must_use]
    pub fn new(lock: Arc<dyn LockProvider>) -> Self {
        Self::starting_at(Utc::now().timestamp_millis(), lock)
    }

    /// Creates a clock starting at an explicit epoch-millisecond instant.
    #[must_use]
    pub fn starting_at(millis: i64, lock: Arc<dyn LockProvider>) -> Self {
        Self {
            lock,
            millis: AtomicI64::new(millis),
        }
    }

    /// The current time in epoch milliseconds.
    #[must_use]
    pub fn now_millis(&self) -> i64 {
        let _guard = LockGuard::new(&*self.lock);
        self.millis.load(Ordering::Relaxed)
    }

    /// Moves the clock by `duration`. Negative durations move it backward.
    pub fn advance(&self, duration: Duration) {
        let _guard = LockGuard::new(&*self.lock);
        let current = self.millis.load(Ordering::Relaxed);
        let next = current.saturating_add(duration.num_milliseconds());
        self.millis.store(next, Ordering::Relaxed);
        tracing::trace!(from = current, to = next, "logical clock advanced");
    }

    /// Resets the clock to the current system time.
    pub fn reset(&self) {
        let _guard = LockGuard::new(&*self.lock);
        self.millis
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }
}

impl Clock for LogicalClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_millis()).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl std::fmt::Debug for LogicalClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicalClock")
            .field("millis", &self.millis.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use crate::lock::MutexLock;
    use std::thread;

    fn clock_at(millis: i64) -> LogicalClock {
        LogicalClock::starting_at(millis, Arc::new(MutexLock::new()))
    }

    #[test]
    fn advance_moves_time_forward() {
        let clock = clock_at(1_000);
        clock.advance(Duration::hours(2));
        assert_eq!(clock.now_millis(), 1_000 + 2 * 60 * 60 * 1_000);
    }

    #[test]
    fn negative_advance_moves_time_backward() {
        let clock = clock_at(10_000);
        clock.advance(Duration::milliseconds(-4_000));
        assert_eq!(clock.now_millis(), 6_000);
    }

    #[test]
    fn reset_returns_to_system_time() {
        let clock = clock_at(0);
        let before = Utc::now().timestamp_millis();
        clock.reset();
        let after = Utc::now().timestamp_millis();
        let observed = clock.now_millis();
        assert!(observed >= before && observed <= after);
    }

    #[test]
    fn concurrent_advances_all_apply() {
        let clock = Arc::new(clock_at(0));
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || {
                    for _ in 0..100 {
                        clock.advance(Duration::milliseconds(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(clock.now_millis(), 1_000);
    }

    #[test]
    fn clock_trait_converts_to_datetime() {
        let clock = clock_at(0);
        assert_eq!(clock.now(), DateTime::from_timestamp_millis(0).unwrap());
    }
}
