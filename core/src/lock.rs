//! Exclusive-access capability.
//!
//! Seat availability and the logical clock are the only shared mutable state
//! in this crate. Both are guarded through [`LockProvider`], an injected
//! capability rather than a concrete lock type, so tests can substitute a
//! counting or no-op lock and production code can choose its own primitive.
//!
//! Critical sections are always a single flag check-and-flip or clock
//! read/write; no lock is ever held across a multi-seat loop.

use std::sync::{Condvar, Mutex, PoisonError};

/// Mutual-exclusion capability guarding a single piece of shared state.
///
/// Implementations must guarantee that between a call to `acquire` and the
/// matching `release`, no other caller's `acquire` returns.
pub trait LockProvider: Send + Sync {
    /// Acquires the lock, blocking until it is available.
    fn acquire(&self);

    /// Releases the lock.
    fn release(&self);

    /// Whether the lock is currently held by any caller.
    fn is_locked(&self) -> bool;
}

/// RAII guard over a [`LockProvider`]; releases on drop.
pub struct LockGuard<'a> {
    lock: &'a dyn LockProvider,
}

impl<'a> LockGuard<'a> {
    /// Acquires `lock` and returns a guard that releases it when dropped.
    pub fn new(lock: &'a dyn LockProvider) -> Self {
        lock.acquire();
        Self { lock }
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// Standard-library implementation of [`LockProvider`].
///
/// A `Mutex<bool>` plus `Condvar` rather than holding a `MutexGuard`, because
/// the capability contract separates `acquire` from `release` across calls.
/// A poisoned mutex is recovered rather than propagated: the guarded state is
/// a single flag, which is valid in either position.
#[derive(Default)]
pub struct MutexLock {
    held: Mutex<bool>,
    available: Condvar,
}

impl MutexLock {
    /// Creates an unlocked `MutexLock`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: Mutex::new(false),
            available: Condvar::new(),
        }
    }
}

impl LockProvider for MutexLock {
    fn acquire(&self) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while *held {
            held = self
                .available
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *held = true;
    }

    fn release(&self) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        *held = false;
        drop(held);
        self.available.notify_one();
    }

    fn is_locked(&self) -> bool {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for MutexLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutexLock")
            .field("locked", &self.is_locked())
            .finish()
    }
}
