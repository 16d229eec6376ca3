//! Usage credentials derived from reservations.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::seat::Seat;
use crate::session::Session;
use crate::types::{Money, ReservationId, TicketId};
use crate::user::User;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// A usage credential for one seat of one reservation.
///
/// Mostly independent of the reservation it came from: validity is derived
/// from the ticket's own fields plus the session's live activity, never from
/// reservation status. Reads cannot block; `Ticket` takes no locks.
#[derive(Clone)]
pub struct Ticket {
    id: TicketId,
    user: User,
    seat: Seat,
    session: Session,
    reservation_id: ReservationId,
    price: Money,
    valid_until: NaiveDate,
    used: bool,
    clock: Arc<dyn Clock>,
}

impl Ticket {
    /// Issues a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `id` is empty or `price` is
    /// negative.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: TicketId,
        user: User,
        seat: Seat,
        session: Session,
        reservation_id: ReservationId,
        price: Money,
        valid_until: NaiveDate,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if id.is_empty() {
            return Err(Error::validation("ticket id must not be empty"));
        }
        if price.is_negative() {
            return Err(Error::validation("ticket price must not be negative"));
        }
        Ok(Self {
            id,
            user,
            seat,
            session,
            reservation_id,
            price,
            valid_until,
            used: false,
            clock,
        })
    }

    /// The ticket identifier.
    #[must_use]
    pub const fn id(&self) -> &TicketId {
        &self.id
    }

    /// The ticket holder.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// The seat this ticket admits to.
    #[must_use]
    pub const fn seat(&self) -> &Seat {
        &self.seat
    }

    /// The session this ticket admits to.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The reservation this ticket was issued against.
    #[must_use]
    pub const fn reservation_id(&self) -> &ReservationId {
        &self.reservation_id
    }

    /// The settled price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Last day (exclusive) the ticket can be used.
    #[must_use]
    pub const fn valid_until(&self) -> NaiveDate {
        self.valid_until
    }

    /// Whether the ticket has been used.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.used
    }

    /// Marks the ticket used. Idempotent: marking a used ticket again is a
    /// no-op, never an error. The flag never reverts.
    pub const fn mark_as_used(&mut self) {
        self.used = true;
    }

    /// Whether the ticket admits right now: unused, before its expiry date,
    /// and the session is active.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.used
            && self.clock.now().date_naive() < self.valid_until
            && self.session.is_active()
    }
}

impl PartialEq for Ticket {
    /// Structural equality over every field except the clock handle.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.user == other.user
            && self.seat == other.seat
            && self.session == other.session
            && self.reservation_id == other.reservation_id
            && self.price == other.price
            && self.valid_until == other.valid_until
            && self.used == other.used
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("id", &self.id)
            .field("user", &self.user.id())
            .field("seat", &self.seat.id())
            .field("session", &self.session.id())
            .field("reservation", &self.reservation_id)
            .field("price", &self.price)
            .field("valid_until", &self.valid_until)
            .field("used", &self.used)
            .finish()
    }
}
