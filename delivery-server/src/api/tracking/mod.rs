//! Tracking API Module
//!
//! Snapshot polling for delivery tracking. The push channel itself is an
//! in-process primitive ([`crate::tracking::TrackingFeed::subscribe`])
//! wired to whatever transport the deployment provides.

mod handler;

pub use handler::TrackingResponse;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Tracking router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tracking", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{order_id}", get(handler::snapshot))
}
