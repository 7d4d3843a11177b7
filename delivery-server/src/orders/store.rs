//! In-memory order persistence boundary
//!
//! Every write passes through [`recompute`] first, so derived totals and
//! split figures can never drift from the items regardless of what the
//! caller sent. Orders are soft-deleted via `is_active`; rows are never
//! physically removed.

use dashmap::DashMap;
use shared::models::{Order, OrderCreate, OrderStatus, OrderUpdate};

use super::engine::{RemainderPolicy, recompute};
use super::error::OrderError;
use crate::utils::now_millis;

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: DashMap<String, Order>,
    remainder_policy: RemainderPolicy,
}

impl OrderStore {
    pub fn new(remainder_policy: RemainderPolicy) -> Self {
        Self {
            orders: DashMap::new(),
            remainder_policy,
        }
    }

    /// Create an order from a checkout payload
    pub fn create(&self, payload: OrderCreate) -> Result<Order, OrderError> {
        let now = now_millis();
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            restaurant_id: payload.restaurant_id,
            restaurant_location: payload.restaurant_location,
            items: payload.items,
            total_amount: 0.0,
            split_bill: payload.split_bill,
            status: OrderStatus::Pending,
            delivery_address: payload.delivery_address,
            payment_method: payload.payment_method,
            is_paid: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let order = recompute(order, self.remainder_policy)?;
        tracing::info!(order_id = %order.id, total = order.total_amount, "Order created");
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    /// Recompute derived fields and persist the order
    pub fn save(&self, order: Order) -> Result<Order, OrderError> {
        let mut order = recompute(order, self.remainder_policy)?;
        order.updated_at = now_millis();
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.get(id).map(|entry| entry.clone())
    }

    /// Fetch an order or fail with UnknownOrder
    pub fn require(&self, id: &str) -> Result<Order, OrderError> {
        self.get(id)
            .ok_or_else(|| OrderError::UnknownOrder(id.to_string()))
    }

    /// All orders, newest first; soft-deleted rows only when requested
    pub fn list(&self, include_inactive: bool) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| include_inactive || entry.is_active)
            .map(|entry| entry.clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Apply a partial update, recompute, and persist atomically per order
    pub fn apply_update(&self, id: &str, update: OrderUpdate) -> Result<Order, OrderError> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| OrderError::UnknownOrder(id.to_string()))?;

        let mut order = entry.clone();
        if let Some(items) = update.items {
            order.items = items;
        }
        if let Some(split) = update.split_bill {
            order.split_bill = Some(split);
        }
        if let Some(is_paid) = update.is_paid {
            order.is_paid = is_paid;
        }

        let mut order = recompute(order, self.remainder_policy)?;
        order.updated_at = now_millis();
        *entry = order.clone();
        Ok(order)
    }

    /// Status transition driven by the fulfilment workflow
    pub fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, OrderError> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| OrderError::UnknownOrder(id.to_string()))?;
        let previous = entry.status;
        entry.status = status;
        entry.updated_at = now_millis();
        tracing::info!(order_id = %id, ?previous, ?status, "Order status changed");
        Ok(entry.clone())
    }

    /// Soft delete: the row stays, `is_active` flips
    pub fn soft_delete(&self, id: &str) -> Result<Order, OrderError> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| OrderError::UnknownOrder(id.to_string()))?;
        entry.is_active = false;
        entry.updated_at = now_millis();
        Ok(entry.clone())
    }
}
