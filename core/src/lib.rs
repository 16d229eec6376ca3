//! # Reserva Core
//!
//! Domain core for reserving scarce, uniquely-identified seats within
//! time-bounded sessions: lock-guarded seat availability, an all-or-nothing
//! reservation state machine, composable discount pricing, and expiration
//! against an explicitly injected, advanceable clock.
//!
//! ## Core Concepts
//!
//! - **Seat**: the atomic unit of contention; a lock-guarded availability
//!   flag with `reserve`/`release` check-and-flip transitions.
//! - **Session**: a named time window over a location and an immutable seat
//!   set.
//! - **Reservation**: a hold on a set of seats; acquired all-or-nothing,
//!   released atomically on cancel, expired by predicate only.
//! - **Ticket**: a usage credential derived from a reservation, independently
//!   trackable as used/unused.
//! - **`PriceChain`**: an ordered, immutable-on-append sequence of discount
//!   rules folded to a single non-negative amount.
//! - **`LogicalClock`**: an advanceable stand-in for wall-clock time, so
//!   expiration tests never sleep.
//!
//! ## Architecture Principles
//!
//! - Value semantics: transitions return new instances; concurrent readers
//!   never take a lock.
//! - Exclusive access as an injected capability ([`lock::LockProvider`]), not
//!   a hardwired primitive.
//! - No ambient time: every time-dependent predicate consults an injected
//!   [`clock::Clock`].
//! - Every error is surfaced to the direct caller; nothing is retried or
//!   logged-and-suppressed.
//!
//! ## Example
//!
//! ```
//! use reserva_core::clock::{Clock, LogicalClock};
//! use reserva_core::location::Location;
//! use reserva_core::lock::MutexLock;
//! use reserva_core::price::PriceChain;
//! use reserva_core::reservation::Reservation;
//! use reserva_core::seat::Seat;
//! use reserva_core::session::Session;
//! use reserva_core::types::{Money, ReservationId, SeatId, SessionId, UserId};
//! use reserva_core::user::User;
//! use chrono::Duration;
//! use std::sync::Arc;
//!
//! # fn main() -> reserva_core::error::Result<()> {
//! let clock = Arc::new(LogicalClock::new(Arc::new(MutexLock::new())));
//! let seats = vec![
//!     Seat::create(SeatId::new("A-1"), "front row", Arc::new(MutexLock::new()), true)?,
//!     Seat::create(SeatId::new("A-2"), "front row", Arc::new(MutexLock::new()), true)?,
//! ];
//! let session = Session::create(
//!     SessionId::new("s-1"),
//!     "Evening show",
//!     clock.now() - Duration::hours(1),
//!     clock.now() + Duration::hours(3),
//!     Location::new("Alpenhaus", "1 Bergweg", 120),
//!     seats.clone(),
//!     clock.clone(),
//! )?;
//!
//! let reservation = Reservation::create(
//!     ReservationId::new("r-1"),
//!     User::create(UserId::new("u-1"), "Lena Dorn", "lena@example.org")?,
//!     session,
//!     seats,
//!     clock.now(),
//!     Duration::hours(1),
//!     None,
//!     PriceChain::new(Money::from_major(100))
//!         .with_rule(|amount: Money| amount.saturating_sub(Money::from_major(10))),
//!     clock.clone(),
//! )?;
//!
//! assert_eq!(reservation.price().evaluate(), Money::from_major(90));
//! assert!(!reservation.is_expired());
//! clock.advance(Duration::hours(2));
//! assert!(reservation.is_expired());
//!
//! let cancelled = reservation.cancel()?;
//! assert!(cancelled.session().has_available_seats());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod location;
pub mod lock;
pub mod price;
pub mod reservation;
pub mod seat;
pub mod session;
pub mod snapshot;
pub mod ticket;
pub mod types;
pub mod user;

pub use clock::{Clock, LogicalClock, WallClock};
pub use error::{Error, Result};
pub use location::Location;
pub use lock::{LockGuard, LockProvider, MutexLock};
pub use price::{DiscountRule, PriceChain};
pub use reservation::{Reservation, ReservationStatus, StandardStatus};
pub use seat::Seat;
pub use session::Session;
pub use ticket::Ticket;
pub use types::{Money, ReservationId, SeatId, SessionId, TicketId, UserId};
pub use user::{User, UserRepository};
