use crate::config::MAX_INTERPOLATED_POINTS;
use crate::domain::{Midpoint, Vertex};

use super::distance::haversine_distance;

/// Evenly spaced points strictly between `a` and `b`
///
/// The count comes from the Haversine length of the edge, but positions are
/// linear in lat/lng, which is close enough at field scale. A spacing that
/// would need more than `MAX_INTERPOLATED_POINTS` points yields nothing.
///
/// # Arguments
/// * `spacing_m` - Target gap between consecutive points in meters
/// * `radius_m` - Sphere radius for the distance computation
pub fn interpolate(a: &Vertex, b: &Vertex, spacing_m: f64, radius_m: f64) -> Vec<Vertex> {
    if !spacing_m.is_finite() || spacing_m <= 0.0 {
        return Vec::new();
    }

    let distance = haversine_distance(a, b, radius_m);
    if distance <= 0.0 {
        return Vec::new();
    }

    let steps = (distance / spacing_m).floor();
    if steps > MAX_INTERPOLATED_POINTS as f64 {
        tracing::warn!(
            spacing_m,
            distance_m = distance,
            "spacing too small, more than {} points needed",
            MAX_INTERPOLATED_POINTS
        );
        return Vec::new();
    }
    let count = steps as usize;

    (1..count)
        .map(|i| a.lerp(b, i as f64 * spacing_m / distance))
        .collect()
}

/// One midpoint per edge of the closed ring, the arithmetic mean of its endpoints
///
/// Rings with fewer than 3 vertices have no edges worth splitting.
pub fn edge_midpoints(vertices: &[Vertex]) -> Vec<Midpoint> {
    let n = vertices.len();
    if n < 3 {
        return Vec::new();
    }

    (0..n)
        .map(|i| {
            let next = (i + 1) % n;
            Midpoint::new(i, vertices[i].lerp(&vertices[next], 0.5))
        })
        .collect()
}
