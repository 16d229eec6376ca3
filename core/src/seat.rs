//! The atomic unit of contention: a seat and its availability flag.

use crate::error::{Error, Result};
use crate::lock::{LockGuard, LockProvider};
use crate::types::SeatId;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A reservable seat.
///
/// `Seat` is a value-semantic handle: [`Seat::reserve`] and [`Seat::release`]
/// return a new handle rather than mutating in place, but every handle for one
/// seat identity shares a single lock-guarded availability cell. Two racing
/// `reserve` calls on the same identity therefore see one linearizable
/// history: exactly one succeeds, the other gets
/// [`Error::InvalidState`]. Seats with different identities never contend.
///
/// Reads ([`Seat::is_available`]) are lock-free snapshots; the exclusive
/// region covers only the check-and-flip itself.
#[derive(Clone)]
pub struct Seat {
    id: SeatId,
    description: String,
    cell: Arc<SeatCell>,
}

struct SeatCell {
    lock: Arc<dyn LockProvider>,
    available: AtomicBool,
}

impl Seat {
    /// Creates a seat with an explicit initial availability.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `id` is empty.
    pub fn create(
        id: SeatId,
        description: impl Into<String>,
        lock: Arc<dyn LockProvider>,
        available: bool,
    ) -> Result<Self> {
        if id.is_empty() {
            return Err(Error::validation("seat id must not be empty"));
        }
        Ok(Self {
            id,
            description: description.into(),
            cell: Arc::new(SeatCell {
                lock,
                available: AtomicBool::new(available),
            }),
        })
    }

    /// The seat identifier.
    #[must_use]
    pub const fn id(&self) -> &SeatId {
        &self.id
    }

    /// Human-readable description (row, block, accessibility notes, ...).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current availability snapshot. Never blocks.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.cell.available.load(Ordering::Acquire)
    }

    /// Flips the seat to reserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the seat is already reserved; under
    /// contention exactly one of the racing callers succeeds.
    pub fn reserve(&self) -> Result<Self> {
        let _guard = LockGuard::new(&*self.cell.lock);
        if self.cell.available.load(Ordering::Relaxed) {
            self.cell.available.store(false, Ordering::Release);
            tracing::debug!(seat = %self.id, "seat reserved");
            Ok(self.clone())
        } else {
            Err(Error::InvalidState("seat is already reserved"))
        }
    }

    /// Flips the seat back to available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the seat is already available.
    pub fn release(&self) -> Result<Self> {
        let _guard = LockGuard::new(&*self.cell.lock);
        if self.cell.available.load(Ordering::Relaxed) {
            Err(Error::InvalidState("seat is already available"))
        } else {
            self.cell.available.store(true, Ordering::Release);
            tracing::debug!(seat = %self.id, "seat released");
            Ok(self.clone())
        }
    }

    /// Whether `other` is a handle for the same seat cell.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl PartialEq for Seat {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.description == other.description
            && self.is_available() == other.is_available()
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("available", &self.is_available())
            .finish()
    }
}
