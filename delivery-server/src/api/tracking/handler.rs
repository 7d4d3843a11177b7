//! Tracking API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::tracking::TrackingQuery;
use crate::utils::AppResult;
use shared::models::TrackingSnapshot;

/// Snapshot response
///
/// NOT_TRACKING is a regular response with no position data, not an
/// error: the order exists but is not out for delivery.
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub order_id: String,
    pub tracking: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<TrackingSnapshot>,
}

impl TrackingResponse {
    fn active(order_id: String, snapshot: TrackingSnapshot) -> Self {
        Self {
            order_id,
            tracking: "TRACKING",
            snapshot: Some(snapshot),
        }
    }

    fn not_tracking(order_id: String) -> Self {
        Self {
            order_id,
            tracking: "NOT_TRACKING",
            snapshot: None,
        }
    }
}

/// Current tracking snapshot for an order
///
/// Lazily starts the session on the first request while the order is out
/// for delivery. Unknown order ids are a 404.
pub async fn snapshot(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TrackingResponse>> {
    let order = state.orders.require(&id)?;
    let response = match state.tracking.snapshot_for(&order) {
        TrackingQuery::Active(snap) => TrackingResponse::active(order.id, snap),
        TrackingQuery::NotTracking => TrackingResponse::not_tracking(order.id),
    };
    Ok(Json(response))
}
