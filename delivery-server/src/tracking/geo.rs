//! Geographic math for the tracking feed

use shared::models::GeoPoint;

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points (haversine)
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Move `fraction` of the remaining straight-line vector toward `dest`
///
/// Plain linear interpolation in degree space; accurate enough at
/// city-delivery distances.
pub fn step_toward(current: GeoPoint, dest: GeoPoint, fraction: f64) -> GeoPoint {
    GeoPoint {
        lat: current.lat + (dest.lat - current.lat) * fraction,
        lng: current.lng + (dest.lng - current.lng) * fraction,
    }
}
