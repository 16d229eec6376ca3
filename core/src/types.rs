//! Identifier newtypes and the `Money` value object.
//!
//! Identifiers are string-backed: they arrive from external collaborators
//! (ticket printers, booking desks, imports) and carry no structure beyond
//! equality and ordering. `Money` is a signed cents amount; discount folds may
//! pass through negative intermediates before the final clamp to zero.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Unique identifier for a seat.
    SeatId
}

string_id! {
    /// Unique identifier for a session.
    SessionId
}

string_id! {
    /// Unique identifier for a reservation.
    ReservationId
}

string_id! {
    /// Unique identifier for a ticket.
    TicketId
}

string_id! {
    /// Unique identifier for a user.
    UserId
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Money in signed cents.
///
/// Signed so that a discount chain can dip below zero mid-fold; the chain's
/// evaluation clamps the final result, not the intermediates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole currency units.
    ///
    /// # Panics
    ///
    /// Panics if the conversion would overflow (units * 100 > `i64::MAX`).
    /// Use [`Money::checked_from_major`] for non-panicking conversion.
    #[must_use]
    #[allow(clippy::panic)]
    pub const fn from_major(units: i64) -> Self {
        match units.checked_mul(100) {
            Some(cents) => Self(cents),
            None => panic!("Money::from_major overflow"),
        }
    }

    /// Creates a `Money` value from whole currency units with overflow
    /// checking.
    #[must_use]
    pub const fn checked_from_major(units: i64) -> Option<Self> {
        match units.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts with overflow checking.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtracts two amounts with overflow checking.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Adds two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Clamps a negative amount to zero.
    #[must_use]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 { Self::ZERO } else { self }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}
