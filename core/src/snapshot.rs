//! Plain-data snapshots for the persistence collaborator.
//!
//! Live domain values carry lock and clock handles, which do not serialize.
//! Storage is handed these snapshots instead; re-hydration back into live
//! values is the repository implementation's concern and must re-supply the
//! capabilities (and is trusted to preserve the invariants it read).

use crate::reservation::{Reservation, ReservationStatus};
use crate::seat::Seat;
use crate::ticket::Ticket;
use crate::types::{Money, ReservationId, SeatId, SessionId, TicketId};
use crate::user::User;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// Seat identifier.
    pub id: SeatId,
    /// Seat description.
    pub description: String,
    /// Availability at snapshot time.
    pub available: bool,
}

impl From<&Seat> for SeatSnapshot {
    fn from(seat: &Seat) -> Self {
        Self {
            id: seat.id().clone(),
            description: seat.description().to_owned(),
            available: seat.is_available(),
        }
    }
}

/// Point-in-time view of a reservation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSnapshot {
    /// Reservation identifier.
    pub id: ReservationId,
    /// The holding user.
    pub user: User,
    /// The session the seats belong to.
    pub session_id: SessionId,
    /// Seat views at snapshot time.
    pub seats: Vec<SeatSnapshot>,
    /// When the reservation was created.
    pub creation_time: DateTime<Utc>,
    /// Expiration window in milliseconds after creation.
    pub expiration_millis: i64,
    /// Status at snapshot time.
    pub status: ReservationStatus,
    /// The evaluated final price at snapshot time.
    pub final_price: Money,
}

impl From<&Reservation> for ReservationSnapshot {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id().clone(),
            user: reservation.user().clone(),
            session_id: reservation.session().id().clone(),
            seats: reservation.seats().iter().map(SeatSnapshot::from).collect(),
            creation_time: reservation.creation_time(),
            expiration_millis: reservation.expiration().num_milliseconds(),
            status: reservation.status().clone(),
            final_price: reservation.price().evaluate(),
        }
    }
}

/// Point-in-time view of a ticket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSnapshot {
    /// Ticket identifier.
    pub id: TicketId,
    /// The ticket holder.
    pub user: User,
    /// The seat this ticket admits to.
    pub seat: SeatSnapshot,
    /// The session this ticket admits to.
    pub session_id: SessionId,
    /// The reservation the ticket was issued against.
    pub reservation_id: ReservationId,
    /// The settled price.
    pub price: Money,
    /// Last day (exclusive) the ticket can be used.
    pub valid_until: NaiveDate,
    /// Whether the ticket has been used.
    pub used: bool,
}

impl From<&Ticket> for TicketSnapshot {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id().clone(),
            user: ticket.user().clone(),
            seat: SeatSnapshot::from(ticket.seat()),
            session_id: ticket.session().id().clone(),
            reservation_id: ticket.reservation_id().clone(),
            price: ticket.price(),
            valid_until: ticket.valid_until(),
            used: ticket.is_used(),
        }
    }
}
