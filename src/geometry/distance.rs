use crate::config::EARTH_RADIUS_M;
use crate::domain::Vertex;

/// Great-circle distance in meters on a sphere of the given radius
///
/// Haversine formula:
/// - a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)
/// - d = 2·R·atan2(√a, √(1−a))
pub fn haversine_distance(a: &Vertex, b: &Vertex, radius_m: f64) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * radius_m * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Haversine distance using the WGS84 equatorial radius
pub fn distance(a: &Vertex, b: &Vertex) -> f64 {
    haversine_distance(a, b, EARTH_RADIUS_M)
}
