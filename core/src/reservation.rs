//! The reservation state machine.
//!
//! A reservation atomically acquires a set of seats at construction
//! (all-or-nothing, with compensating rollback on partial failure), holds them
//! while `PENDING`, and releases them all on `cancel`. Expiration is a
//! derived, read-only predicate against the injected clock; a scheduler that
//! observes it may drive the status to `EXPIRED`, but this core never
//! transitions a reservation on its own.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::price::PriceChain;
use crate::seat::Seat;
use crate::session::Session;
use crate::types::ReservationId;
use crate::user::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The standard reservation statuses.
///
/// This core defines transition logic only for `Pending` → `Cancelled`;
/// external collaborators drive the remaining transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardStatus {
    /// Seats are held; the one state `cancel` accepts.
    Pending,
    /// Payment (or equivalent) confirmed by a collaborator.
    Confirmed,
    /// Terminal: seats released by `cancel`.
    Cancelled,
    /// Marked by a scheduler that observed `is_expired()`.
    Expired,
    /// The session took place and the reservation was honored.
    Complete,
    /// Collaborator-defined operational state.
    Active,
    /// Collaborator-defined operational state.
    Inactive,
}

impl fmt::Display for StandardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
            Self::Complete => "COMPLETE",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        };
        write!(f, "{label}")
    }
}

/// A standard status plus an open-ended map of custom string statuses
/// layered on top of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStatus {
    standard: StandardStatus,
    custom: BTreeMap<String, String>,
}

impl ReservationStatus {
    /// Wraps a standard status with no custom entries.
    #[must_use]
    pub const fn new(standard: StandardStatus) -> Self {
        Self {
            standard,
            custom: BTreeMap::new(),
        }
    }

    /// The standard status.
    #[must_use]
    pub const fn standard(&self) -> StandardStatus {
        self.standard
    }

    /// Returns a copy with a custom status entry added or replaced.
    #[must_use]
    pub fn with_custom_status(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut custom = self.custom.clone();
        custom.insert(key.into(), value.into());
        Self {
            standard: self.standard,
            custom,
        }
    }

    /// Returns a copy with a custom status entry removed.
    #[must_use]
    pub fn without_custom_status(&self, key: &str) -> Self {
        let mut custom = self.custom.clone();
        custom.remove(key);
        Self {
            standard: self.standard,
            custom,
        }
    }

    /// The custom status entries.
    #[must_use]
    pub const fn custom_statuses(&self) -> &BTreeMap<String, String> {
        &self.custom
    }

    /// A unified view: the standard status under `"standard"` plus every
    /// custom entry.
    #[must_use]
    pub fn all_statuses(&self) -> BTreeMap<String, String> {
        let mut all = self.custom.clone();
        all.insert("standard".to_owned(), self.standard.to_string());
        all
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::new(StandardStatus::Pending)
    }
}

/// A hold on a set of seats by a user for a session, with an expiration
/// window.
///
/// Constructed only through [`Reservation::create`], which reserves every
/// requested seat or none of them. Immutable afterwards except for the one
/// legal transition out of `PENDING`: [`Reservation::cancel`].
#[derive(Clone)]
pub struct Reservation {
    id: ReservationId,
    user: User,
    session: Session,
    seats: Vec<Seat>,
    creation_time: DateTime<Utc>,
    expiration: Duration,
    status: ReservationStatus,
    price: PriceChain,
    clock: Arc<dyn Clock>,
}

impl Reservation {
    /// Creates a reservation, atomically reserving every seat in `seats`.
    ///
    /// Seats are acquired in ascending id order so that two reservations
    /// contending for overlapping seat sets cannot deadlock. If any seat is
    /// already reserved, every seat acquired earlier in this call is released
    /// before the error propagates: the operation is all-or-nothing.
    ///
    /// `status` defaults to `PENDING` when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `id` is empty or `seats` is empty,
    /// and [`Error::SeatUnavailable`] if any requested seat was already
    /// reserved (with no seats left held).
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: ReservationId,
        user: User,
        session: Session,
        seats: Vec<Seat>,
        creation_time: DateTime<Utc>,
        expiration: Duration,
        status: Option<ReservationStatus>,
        price: PriceChain,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if id.is_empty() {
            return Err(Error::validation("reservation id must not be empty"));
        }
        if seats.is_empty() {
            return Err(Error::validation(
                "reservation must request at least one seat",
            ));
        }

        let mut candidates = seats;
        candidates.sort_by(|a, b| a.id().cmp(b.id()));

        let mut held: Vec<Seat> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match candidate.reserve() {
                Ok(reserved) => held.push(reserved),
                Err(_) => {
                    Self::roll_back(&id, &held);
                    return Err(Error::SeatUnavailable {
                        seat_id: candidate.id().clone(),
                    });
                },
            }
        }

        tracing::debug!(
            reservation = %id,
            user = %user.id(),
            session = %session.id(),
            seats = held.len(),
            "reservation created"
        );

        Ok(Self {
            id,
            user,
            session,
            seats: held,
            creation_time,
            expiration,
            status: status.unwrap_or_default(),
            price,
            clock,
        })
    }

    /// Releases seats acquired before a later seat in the same request
    /// failed. A release failure here means another caller flipped a seat we
    /// hold, which is an invariant violation; it is logged and the
    /// `SeatUnavailable` error still propagates.
    fn roll_back(id: &ReservationId, held: &[Seat]) {
        for seat in held {
            if let Err(error) = seat.release() {
                tracing::error!(
                    reservation = %id,
                    seat = %seat.id(),
                    %error,
                    "rollback release failed; seat registry invariant violated"
                );
            }
        }
    }

    /// The reservation identifier.
    #[must_use]
    pub const fn id(&self) -> &ReservationId {
        &self.id
    }

    /// The holding user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// The session the seats belong to.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The held seats, in acquisition (ascending id) order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// When the reservation was created.
    #[must_use]
    pub const fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// How long after creation the reservation expires.
    #[must_use]
    pub const fn expiration(&self) -> Duration {
        self.expiration
    }

    /// The current status.
    #[must_use]
    pub const fn status(&self) -> &ReservationStatus {
        &self.status
    }

    /// The price chain attached to this reservation.
    #[must_use]
    pub const fn price(&self) -> &PriceChain {
        &self.price
    }

    /// Whether the injected clock has passed `creation_time + expiration`.
    ///
    /// Read-only: observing expiration never transitions the reservation.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.clock.now() > self.creation_time + self.expiration
    }

    /// Cancels a `PENDING` reservation, releasing every held seat.
    ///
    /// Returns a new reservation with status `CANCELLED` and the released
    /// seats; the receiver is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the reservation is not `PENDING`,
    /// or if a held seat refuses to release — the latter indicates a prior
    /// invariant violation and is not retried.
    pub fn cancel(&self) -> Result<Self> {
        if self.status.standard() != StandardStatus::Pending {
            return Err(Error::InvalidState(
                "reservation cannot be cancelled in its current state",
            ));
        }

        let mut released: Vec<Seat> = Vec::with_capacity(self.seats.len());
        for seat in &self.seats {
            released.push(seat.release()?);
        }

        tracing::debug!(reservation = %self.id, seats = released.len(), "reservation cancelled");

        Ok(Self {
            id: self.id.clone(),
            user: self.user.clone(),
            session: self.session.clone(),
            seats: released,
            creation_time: self.creation_time,
            expiration: self.expiration,
            status: ReservationStatus::new(StandardStatus::Cancelled),
            price: self.price.clone(),
            clock: Arc::clone(&self.clock),
        })
    }
}

impl PartialEq for Reservation {
    /// Structural equality over every field except the clock handle,
    /// including the current seat snapshots.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.user == other.user
            && self.session == other.session
            && self.seats == other.seats
            && self.creation_time == other.creation_time
            && self.expiration == other.expiration
            && self.status == other.status
            && self.price == other.price
    }
}

impl fmt::Debug for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reservation")
            .field("id", &self.id)
            .field("user", &self.user.id())
            .field("session", &self.session.id())
            .field("seats", &self.seats)
            .field("creation_time", &self.creation_time)
            .field("expiration", &self.expiration)
            .field("status", &self.status)
            .finish()
    }
}
