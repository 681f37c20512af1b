//! Great-circle proximity filtering.
//!
//! Distances use the haversine formula on a sphere of [`EARTH_RADIUS_KM`].
//! Filtering is a linear scan that keeps candidates in their input order.

use models::address;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // rounding can push `a` just outside [0, 1] near antipodes
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Keep the candidates whose distance to the center is `<= radius_km`.
pub fn find_within<I>(center_lat: f64, center_lon: f64, radius_km: f64, candidates: I) -> Vec<address::Model>
where
    I: IntoIterator<Item = address::Model>,
{
    candidates
        .into_iter()
        .filter(|a| haversine_km(center_lat, center_lon, a.latitude, a.longitude) <= radius_km)
        .collect()
}
