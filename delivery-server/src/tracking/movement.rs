//! Movement sources for tracking sessions
//!
//! The feed does not care where positions come from: the simulated source
//! below interpolates toward the destination, while a production GPS
//! ingest would implement the same trait.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::models::GeoPoint;

use super::geo::step_toward;

/// Fraction of the remaining vector covered per simulated step
const STEP_FRACTION: f64 = 0.1;

/// ETA decrement bounds per step, in minutes
const ETA_DECREMENT_MIN: i64 = 1;
const ETA_DECREMENT_MAX: i64 = 3;

/// Source of driver positions for one tracking session
pub trait MovementSource: Send {
    /// Next driver position given the current position and the fixed destination
    fn next_position(&mut self, current: GeoPoint, destination: GeoPoint) -> GeoPoint;

    /// Minutes to subtract from the ETA for this step
    fn eta_decrement_min(&mut self) -> i64;
}

/// Simulated driver movement: linear interpolation toward the destination
/// plus a jittered ETA countdown
pub struct SimulatedMovement {
    rng: StdRng,
}

impl SimulatedMovement {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SimulatedMovement {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementSource for SimulatedMovement {
    fn next_position(&mut self, current: GeoPoint, destination: GeoPoint) -> GeoPoint {
        step_toward(current, destination, STEP_FRACTION)
    }

    fn eta_decrement_min(&mut self) -> i64 {
        self.rng.gen_range(ETA_DECREMENT_MIN..=ETA_DECREMENT_MAX)
    }
}
