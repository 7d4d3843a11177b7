//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate, OrderUpdate, StatusUpdate};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Include soft-deleted orders
    #[serde(default)]
    pub include_inactive: bool,
}

/// Create an order from a checkout payload
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create(payload)?;
    Ok(Json(order))
}

/// List orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list(query.include_inactive)))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.require(&id)?;
    Ok(Json(order))
}

/// Update items, split configuration, or payment flag
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.apply_update(&id, payload)?;
    Ok(Json(order))
}

/// Status transition from the fulfilment workflow
///
/// Terminal statuses also end the order's tracking session.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_status(&id, payload.status)?;
    state.tracking.on_status_change(&id, payload.status);
    Ok(Json(order))
}

/// Soft delete: the order is deactivated, never removed
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.soft_delete(&id)?;
    Ok(Json(order))
}
