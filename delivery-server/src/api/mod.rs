//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`orders`] - order lifecycle: create, read, update, status, soft delete
//! - [`tracking`] - delivery tracking snapshots

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod health;
pub mod orders;
pub mod tracking;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(tracking::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
