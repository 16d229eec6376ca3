//! Fixture builders for common test scenarios.
//!
//! Every builder takes the clock explicitly where time matters; nothing here
//! reads ambient wall-clock time.

use chrono::Duration;
use reserva_core::clock::{Clock, LogicalClock};
use reserva_core::location::Location;
use reserva_core::lock::MutexLock;
use reserva_core::seat::Seat;
use reserva_core::session::Session;
use reserva_core::types::{SeatId, SessionId, UserId};
use reserva_core::user::User;
use std::sync::Arc;
use uuid::Uuid;

/// A sample user with a unique id.
///
/// # Panics
///
/// Never panics in practice: the fixture email is well-formed.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn sample_user() -> User {
    User::create(
        UserId::new(format!("user-{}", Uuid::new_v4())),
        "Lena Dorn",
        "lena.dorn@example.org",
    )
    .unwrap()
}

/// A sample location with a couple of features.
#[must_use]
pub fn sample_location() -> Location {
    Location::new("Alpenhaus", "1 Bergweg, Seefeld", 120)
        .with_description("Chalet-style concert hall")
        .with_feature("parking", "underground")
}

/// `count` available seats named `{prefix}-1 ..= {prefix}-count`, each with
/// its own lock.
///
/// # Panics
///
/// Never panics in practice: generated seat ids are non-empty.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn seat_block(prefix: &str, count: usize) -> Vec<Seat> {
    (1..=count)
        .map(|n| {
            Seat::create(
                SeatId::new(format!("{prefix}-{n}")),
                format!("row {prefix}, seat {n}"),
                Arc::new(MutexLock::new()),
                true,
            )
            .unwrap()
        })
        .collect()
}

/// A session whose window surrounds the clock's current time (one hour back,
/// four hours forward), so it reports active until the clock moves.
///
/// # Panics
///
/// Never panics in practice: the fixture window and ids are valid.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn session_around(clock: &Arc<LogicalClock>, seats: Vec<Seat>) -> Session {
    let now = clock.now();
    Session::create(
        SessionId::new(format!("session-{}", Uuid::new_v4())),
        "Evening show",
        now - Duration::hours(1),
        now + Duration::hours(4),
        sample_location(),
        seats,
        Arc::clone(clock) as Arc<dyn Clock>,
    )
    .unwrap()
}
