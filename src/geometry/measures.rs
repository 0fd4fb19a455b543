use serde::Serialize;

use super::distance::haversine_distance;
use crate::domain::Vertex;

/// Bounding box in degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from a set of vertices
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }

        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for v in vertices {
            min_lat = min_lat.min(v.lat());
            max_lat = max_lat.max(v.lat());
            min_lng = min_lng.min(v.lng());
            max_lng = max_lng.max(v.lng());
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }
}

/// Length of the closed ring in meters
pub fn perimeter_m(vertices: &[Vertex], radius_m: f64) -> f64 {
    let n = vertices.len();
    if n < 2 {
        return 0.0;
    }
    // two vertices form a degenerate ring that runs there and back
    (0..n)
        .map(|i| haversine_distance(&vertices[i], &vertices[(i + 1) % n], radius_m))
        .sum()
}

/// Arithmetic mean of the vertices, used to center the map on a stored area
pub fn centroid(vertices: &[Vertex]) -> Option<Vertex> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let lat = vertices.iter().map(Vertex::lat).sum::<f64>() / n;
    let lng = vertices.iter().map(Vertex::lng).sum::<f64>() / n;
    Vertex::new(lat, lng).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EARTH_RADIUS_M;
    use crate::geometry::distance;

    fn v(lat: f64, lng: f64) -> Vertex {
        Vertex::new(lat, lng).unwrap()
    }

    #[test]
    fn test_bounds_from_vertices() {
        let ring = vec![v(-12.0, -77.0), v(-12.5, -76.5), v(-11.8, -76.9)];
        let bounds = Bounds::from_vertices(&ring).unwrap();

        assert_eq!(bounds.min_lat, -12.5);
        assert_eq!(bounds.max_lat, -11.8);
        assert_eq!(bounds.min_lng, -77.0);
        assert_eq!(bounds.max_lng, -76.5);
        assert!((bounds.lat_span() - 0.7).abs() < 1e-9);
        assert!(Bounds::from_vertices(&[]).is_none());
    }

    #[test]
    fn test_perimeter_closes_ring() {
        let ring = vec![v(0.0, 0.0), v(0.0, 0.01), v(0.01, 0.01), v(0.01, 0.0)];
        let open: f64 = ring
            .windows(2)
            .map(|w| distance(&w[0], &w[1]))
            .sum();
        let closing = distance(&ring[3], &ring[0]);
        let p = perimeter_m(&ring, EARTH_RADIUS_M);
        assert!((p - (open + closing)).abs() < 1e-9);
        assert_eq!(perimeter_m(&ring[..1], EARTH_RADIUS_M), 0.0);
    }

    #[test]
    fn test_centroid() {
        let ring = vec![v(0.0, 0.0), v(0.0, 2.0), v(2.0, 2.0), v(2.0, 0.0)];
        assert_eq!(centroid(&ring), Some(v(1.0, 1.0)));
        assert_eq!(centroid(&[]), None);
    }
}
