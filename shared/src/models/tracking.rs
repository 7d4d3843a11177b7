//! Live tracking payloads
//!
//! Wire types for the delivery tracking feed: coordinates, the
//! `driver_location` event pushed to subscribers, and the snapshot
//! returned to polling clients.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Geographic coordinate (WGS84 degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A coordinate with the time it was recorded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationStamp {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: Timestamp,
}

impl LocationStamp {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Tracking session state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingState {
    Tracking,
    Completed,
}

/// Position update pushed to subscribers on every advance step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverLocation {
    pub order_id: String,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: Timestamp,
}

/// Point-in-time view of a tracking session
///
/// `path` holds the most recent visited points (bounded), oldest first;
/// it is the only backfill a late subscriber gets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingSnapshot {
    pub order_id: String,
    pub current_location: LocationStamp,
    pub destination: GeoPoint,
    pub path: Vec<GeoPoint>,
    /// Estimated minutes remaining, floored at 1 while tracking
    pub eta_minutes: i64,
    /// Great-circle distance to the destination in kilometres
    pub distance_km: f64,
    pub state: TrackingState,
}
