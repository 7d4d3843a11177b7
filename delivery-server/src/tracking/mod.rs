//! Live delivery tracking
//!
//! - [`geo`] - great-circle distance and interpolation math
//! - [`movement`] - pluggable position source (simulated by default)
//! - [`session`] - per-order session state machine with a bounded trail
//! - [`feed`] - the session registry: lazy start, tick loops, fan-out,
//!   idle eviction
//!
//! Sessions live only in process memory; a restart drops them all.

pub mod feed;
pub mod geo;
pub mod movement;
pub mod session;

use shared::models::TrackingSnapshot;

// Re-exports
pub use feed::{TrackingConfig, TrackingFeed, TrackingSubscription};
pub use movement::{MovementSource, SimulatedMovement};
pub use session::TrackingSession;

/// Tracking feed errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingError {
    #[error("No active tracking session for order: {0}")]
    UnknownOrder(String),
}

/// Result of a snapshot request for an existing order
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingQuery {
    Active(TrackingSnapshot),
    /// The order is not out for delivery; there is no position data.
    /// This is a reportable state, not an error.
    NotTracking,
}
