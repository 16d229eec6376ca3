//! Error taxonomy for the reservation core.
//!
//! Every error here is caller-recoverable: the caller supplied invalid input,
//! attempted an operation from a forbidding state, or lost a race for a seat.
//! Nothing in this crate retries, logs-and-suppresses, or crashes the process.

use crate::types::SeatId;

/// Errors surfaced by the reservation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required field was absent or malformed; raised eagerly at
    /// construction, never left latent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation was attempted from a state that forbids it (reserving an
    /// already-reserved seat, cancelling a non-pending reservation, ...).
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A reservation could not be created because a requested seat was
    /// already reserved. Any seats acquired earlier in the same request have
    /// been released before this error is returned.
    #[error("seat {seat_id} is unavailable")]
    SeatUnavailable {
        /// The first requested seat found to be already reserved.
        seat_id: SeatId,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
