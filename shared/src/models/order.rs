//! Order Model

use serde::{Deserialize, Serialize};

use super::tracking::GeoPoint;
use crate::types::Timestamp;

/// Order fulfilment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses end the fulfilment workflow (and any tracking session)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Dish reference (String ID)
    pub dish_id: String,
    pub name: String,
    /// Unit price in currency units
    pub price: f64,
    pub quantity: i32,
}

/// Split bill mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    #[default]
    Equal,
    Manual,
}

/// One person's share in a manual split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualShare {
    pub name: String,
    /// Amount in currency units
    pub amount: f64,
}

/// Split bill sub-record
///
/// Derived fields are written by the order engine on every save and only
/// populated for the active split type; caller-supplied values in them are
/// overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SplitBill {
    pub enabled: bool,
    pub split_type: SplitType,
    /// Headcount, used only for equal splits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_people: Option<i32>,
    /// Derived: per-head amount for equal splits (ceiling)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equal_split_amount: Option<f64>,
    /// Derived: exact remaining for the final payer (last-payer remainder policy only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_share_amount: Option<f64>,
    /// Per-person shares, required entries only for manual splits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manual_split: Vec<ManualShare>,
    /// Derived: sum of manual shares
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_allocated: Option<f64>,
    /// Derived: total − allocated, negative when over-allocated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<f64>,
}

/// Delivery address with geocoded destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    /// Geocoded destination consumed by the tracking feed
    pub location: GeoPoint,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    /// Pickup coordinates, seeds the tracking session
    pub restaurant_location: GeoPoint,
    pub items: Vec<OrderItem>,
    /// Derived: Σ(price × quantity) in currency units, never settable directly
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_bill: Option<SplitBill>,
    pub status: OrderStatus,
    pub delivery_address: DeliveryAddress,
    pub payment_method: String,
    /// Payment status flag (no gateway integration)
    pub is_paid: bool,
    /// Soft-delete flag, rows are never physically removed
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub restaurant_id: String,
    pub restaurant_location: GeoPoint,
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_bill: Option<SplitBill>,
    pub delivery_address: DeliveryAddress,
    pub payment_method: String,
}

/// Update order payload (None = leave unchanged)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_bill: Option<SplitBill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"OUT_FOR_DELIVERY\"");

        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::OutForDelivery);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
