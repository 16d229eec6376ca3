//! # Reserva Testing
//!
//! Test doubles and fixtures for the reserva domain core.
//!
//! This crate provides:
//! - Mock implementations of the core capabilities (locks, clocks)
//! - An in-memory user repository
//! - Fixture builders for seats, sessions, and users
//!
//! ## Example
//!
//! ```
//! use reserva_testing::fixtures;
//! use reserva_testing::mocks::test_clock;
//! use std::sync::Arc;
//!
//! let clock = Arc::new(test_clock());
//! let seats = fixtures::seat_block("A", 4);
//! let session = fixtures::session_around(&clock, seats);
//! assert!(session.is_active());
//! assert!(session.has_available_seats());
//! ```

pub mod fixtures;
pub mod memory;
pub mod mocks;

/// Installs a compact `tracing` subscriber honoring `RUST_LOG`, for tests
/// that want to see transition events. Safe to call more than once; later
/// calls are no-ops.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .compact()
        .try_init();
}
