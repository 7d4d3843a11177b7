//! Order API Module
//!
//! Order lifecycle endpoints. Every mutation goes through the store's
//! recompute-before-write path, so responses always carry corrected
//! derived fields.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::remove),
        )
        .route("/{id}/status", patch(handler::update_status))
}
