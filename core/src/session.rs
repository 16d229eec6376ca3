//! A named time window over a location and a fixed set of seats.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::location::Location;
use crate::seat::Seat;
use crate::types::{SeatId, SessionId};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A scheduled session.
///
/// Seat membership is fixed at construction; only each seat's availability
/// flag still mutates. The session itself is a read-only view once built.
///
/// Activity is evaluated against the injected clock: pass the shared
/// [`crate::clock::LogicalClock`] for deterministic behavior, or
/// [`crate::clock::WallClock`] when the window should track ambient time.
#[derive(Clone)]
pub struct Session {
    id: SessionId,
    name: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    location: Location,
    seats: Vec<Seat>,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `id` or `name` is empty, or if the
    /// window is empty or inverted (`start_time >= end_time`).
    pub fn create(
        id: SessionId,
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        location: Location,
        seats: Vec<Seat>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let name = name.into();
        if id.is_empty() {
            return Err(Error::validation("session id must not be empty"));
        }
        if name.is_empty() {
            return Err(Error::validation("session name must not be empty"));
        }
        if start_time >= end_time {
            return Err(Error::validation(format!(
                "session window is empty or inverted: {start_time} >= {end_time}"
            )));
        }
        Ok(Self {
            id,
            name,
            start_time,
            end_time,
            location,
            seats,
            clock,
        })
    }

    /// The session identifier.
    #[must_use]
    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    /// The session name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start of the window.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// End of the window.
    #[must_use]
    pub const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Where the session takes place.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// The member seats, in construction order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Whether the clock's current time falls strictly inside the window.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let now = self.clock.now();
        self.start_time < now && now < self.end_time
    }

    /// Whether any member seat reports available.
    #[must_use]
    pub fn has_available_seats(&self) -> bool {
        self.seats.iter().any(Seat::is_available)
    }

    /// Availability of one seat; `false` (not an error) for unknown ids.
    #[must_use]
    pub fn is_seat_available(&self, seat_id: &SeatId) -> bool {
        self.seats
            .iter()
            .find(|seat| seat.id() == seat_id)
            .is_some_and(Seat::is_available)
    }
}

impl PartialEq for Session {
    /// Structural equality over every field except the clock handle.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.location == other.location
            && self.seats == other.seats
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("location", &self.location.name())
            .field("seats", &self.seats.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use crate::clock::LogicalClock;
    use crate::lock::MutexLock;
    use chrono::Duration;

    fn seat(id: &str) -> Seat {
        Seat::create(
            SeatId::new(id),
            format!("seat {id}"),
            Arc::new(MutexLock::new()),
            true,
        )
        .unwrap()
    }

    fn session_around(clock: &Arc<LogicalClock>, seats: Vec<Seat>) -> Session {
        let now = clock.now();
        Session::create(
            SessionId::new("s-1"),
            "Evening show",
            now - Duration::hours(1),
            now + Duration::hours(1),
            Location::new("Alpenhaus", "1 Bergweg", 120),
            seats,
            Arc::clone(clock) as Arc<dyn Clock>,
        )
        .unwrap()
    }

    fn logical_clock() -> Arc<LogicalClock> {
        Arc::new(LogicalClock::starting_at(
            1_735_689_600_000, // 2025-01-01T00:00:00Z
            Arc::new(MutexLock::new()),
        ))
    }

    #[test]
    fn activity_follows_the_injected_clock() {
        let clock = logical_clock();
        let session = session_around(&clock, vec![seat("A-1")]);
        assert!(session.is_active());
        clock.advance(Duration::hours(3));
        assert!(!session.is_active());
        clock.advance(Duration::hours(-3));
        assert!(session.is_active());
    }

    #[test]
    fn window_boundaries_are_exclusive() {
        let clock = logical_clock();
        let now = clock.now();
        let session = Session::create(
            SessionId::new("s-1"),
            "Matinee",
            now,
            now + Duration::hours(2),
            Location::new("Alpenhaus", "1 Bergweg", 120),
            vec![],
            Arc::clone(&clock) as Arc<dyn Clock>,
        )
        .unwrap();
        assert!(!session.is_active());
        clock.advance(Duration::minutes(1));
        assert!(session.is_active());
    }

    #[test]
    fn seat_availability_queries() {
        let clock = logical_clock();
        let a = seat("A-1");
        let b = seat("A-2");
        let session = session_around(&clock, vec![a.clone(), b.clone()]);

        assert!(session.has_available_seats());
        assert!(session.is_seat_available(&SeatId::new("A-2")));
        assert!(!session.is_seat_available(&SeatId::new("Z-9")));

        a.reserve().unwrap();
        b.reserve().unwrap();
        assert!(!session.has_available_seats());
        assert!(!session.is_seat_available(&SeatId::new("A-1")));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let clock = logical_clock();
        let now = clock.now();
        let result = Session::create(
            SessionId::new("s-1"),
            "Backwards",
            now,
            now - Duration::hours(1),
            Location::new("Alpenhaus", "1 Bergweg", 120),
            vec![],
            clock as Arc<dyn Clock>,
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
