//! Per-order tracking session
//!
//! A session is the ephemeral live state of one delivery: the driver's
//! current position, a bounded trail of recent points, and the derived
//! distance/ETA figures. Sessions are owned and serialized by the feed.

use std::collections::VecDeque;

use shared::Timestamp;
use shared::models::{DriverLocation, GeoPoint, LocationStamp, TrackingSnapshot, TrackingState};

use super::geo::haversine_km;
use super::movement::MovementSource;
use crate::utils::now_millis;

/// Bounded length of the recent-path trail
pub const PATH_CAPACITY: usize = 10;

/// Assumed courier speed used to seed the initial ETA (km/h)
const COURIER_SPEED_KMH: f64 = 20.0;

#[derive(Debug)]
pub struct TrackingSession {
    order_id: String,
    current: LocationStamp,
    destination: GeoPoint,
    path: VecDeque<GeoPoint>,
    eta_minutes: i64,
    distance_km: f64,
    state: TrackingState,
    last_touched: Timestamp,
}

impl TrackingSession {
    /// Seed a session at the restaurant's coordinates
    pub fn start(order_id: String, origin: GeoPoint, destination: GeoPoint) -> Self {
        let now = now_millis();
        let distance_km = haversine_km(origin, destination);
        let mut path = VecDeque::with_capacity(PATH_CAPACITY + 1);
        path.push_back(origin);

        Self {
            order_id,
            current: LocationStamp {
                lat: origin.lat,
                lng: origin.lng,
                timestamp: now,
            },
            destination,
            path,
            eta_minutes: initial_eta_minutes(distance_km),
            distance_km,
            state: TrackingState::Tracking,
            last_touched: now,
        }
    }

    /// One advance step
    ///
    /// Returns the publishable position update, or `None` when the session
    /// is completed. A completed session never moves again and keeps its
    /// final recorded state.
    pub fn advance(&mut self, source: &mut dyn MovementSource) -> Option<DriverLocation> {
        if self.state == TrackingState::Completed {
            return None;
        }

        let next = source.next_position(self.current.point(), self.destination);
        let now = now_millis();

        self.current = LocationStamp {
            lat: next.lat,
            lng: next.lng,
            timestamp: now,
        };
        self.distance_km = haversine_km(next, self.destination);
        // The countdown floors at 1: arrival is signalled by the order
        // status transition, never by the clock reaching zero.
        self.eta_minutes = (self.eta_minutes - source.eta_decrement_min()).max(1);

        self.path.push_back(next);
        while self.path.len() > PATH_CAPACITY {
            self.path.pop_front();
        }
        self.last_touched = now;

        Some(DriverLocation {
            order_id: self.order_id.clone(),
            lat: next.lat,
            lng: next.lng,
            timestamp: now,
        })
    }

    /// Terminal transition; idempotent
    pub fn complete(&mut self) {
        self.state = TrackingState::Completed;
        self.last_touched = now_millis();
    }

    pub fn is_completed(&self) -> bool {
        self.state == TrackingState::Completed
    }

    /// Mark the session as recently used (resets the idle clock)
    pub fn touch(&mut self) {
        self.last_touched = now_millis();
    }

    /// Milliseconds since the session was last advanced or read
    pub fn idle_for_ms(&self, now: Timestamp) -> i64 {
        now - self.last_touched
    }

    pub fn snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            order_id: self.order_id.clone(),
            current_location: self.current,
            destination: self.destination,
            path: self.path.iter().copied().collect(),
            eta_minutes: self.eta_minutes,
            distance_km: self.distance_km,
            state: self.state,
        }
    }
}

/// ETA seed proportional to the route length, floored at 1 minute
fn initial_eta_minutes(distance_km: f64) -> i64 {
    ((distance_km / COURIER_SPEED_KMH) * 60.0).ceil().max(1.0) as i64
}
