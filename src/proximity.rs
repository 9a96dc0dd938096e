// src/proximity.rs
// Great-circle filtering for /api/nearby: haversine distance from the query
// point to every normalized point, inclusive radius cut, ascending sort.

use crate::ingest::types::FirePoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two WGS84 coordinates, in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Retain points within `radius_km` of the query coordinate (inclusive),
/// attach the 2-decimal rounded distance, and sort ascending by it. The sort
/// is stable, so ties keep the relative order of the input.
pub fn nearby_points(points: Vec<FirePoint>, lat: f64, lon: f64, radius_km: f64) -> Vec<FirePoint> {
    let mut hits: Vec<(f64, FirePoint)> = Vec::new();
    for mut p in points {
        let d = haversine_km(lat, lon, p.lat, p.lon);
        if d <= radius_km {
            let rounded = (d * 100.0).round() / 100.0;
            p.distance_km = Some(rounded);
            hits.push((rounded, p));
        }
    }
    hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    hits.into_iter().map(|(_, p)| p).collect()
}
