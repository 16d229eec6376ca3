//! Mock capabilities for deterministic tests.

use chrono::{DateTime, Utc};
use reserva_core::clock::{Clock, LogicalClock};
use reserva_core::lock::{LockProvider, MutexLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A lock that never excludes anyone.
///
/// For single-threaded tests that want seat and clock plumbing without
/// paying for synchronization, and for demonstrating that the exclusive-
/// access capability really is injectable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLock;

impl LockProvider for NoopLock {
    fn acquire(&self) {}

    fn release(&self) {}

    fn is_locked(&self) -> bool {
        false
    }
}

/// A real lock that counts how many times it was acquired.
///
/// Useful for asserting that an operation took (or avoided) the exclusive
/// region, e.g. that availability reads are lock-free.
#[derive(Debug, Default)]
pub struct CountingLock {
    inner: MutexLock,
    acquisitions: AtomicU64,
}

impl CountingLock {
    /// Creates an unlocked counting lock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: MutexLock::new(),
            acquisitions: AtomicU64::new(0),
        }
    }

    /// How many times `acquire` has returned.
    #[must_use]
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl LockProvider for CountingLock {
    fn acquire(&self) {
        self.inner.acquire();
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.inner.release();
    }

    fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

/// Fixed clock for deterministic tests.
///
/// Always returns the same time, making tests reproducible.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a fixed clock at the given time.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Epoch milliseconds for 2025-01-01T00:00:00Z, the default test instant.
pub const TEST_EPOCH_MILLIS: i64 = 1_735_689_600_000;

/// A logical clock starting at [`TEST_EPOCH_MILLIS`], backed by a real lock.
#[must_use]
pub fn test_clock() -> LogicalClock {
    LogicalClock::starting_at(TEST_EPOCH_MILLIS, Arc::new(MutexLock::new()))
}

/// A fixed clock pinned to [`TEST_EPOCH_MILLIS`].
#[must_use]
pub fn fixed_test_clock() -> FixedClock {
    FixedClock::new(DateTime::from_timestamp_millis(TEST_EPOCH_MILLIS).unwrap_or_default())
}
