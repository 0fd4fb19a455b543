use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VertexError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A polygon vertex in WGS84 degrees.
///
/// Fields are private so every value in circulation has passed range
/// validation, including values read back from persisted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVertex")]
pub struct Vertex {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawVertex {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawVertex> for Vertex {
    type Error = VertexError;

    fn try_from(raw: RawVertex) -> Result<Self, Self::Error> {
        Vertex::new(raw.lat, raw.lng)
    }
}

impl Vertex {
    pub fn new(lat: f64, lng: f64) -> Result<Self, VertexError> {
        // NaN is never contained in a range
        if !(-90.0..=90.0).contains(&lat) {
            return Err(VertexError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(VertexError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Point at `fraction` along the straight lat/lng chord from `self` to `other`.
    ///
    /// Both inputs are in range, so any fraction in [0, 1] stays in range.
    pub(crate) fn lerp(&self, other: &Vertex, fraction: f64) -> Vertex {
        Vertex {
            lat: self.lat + (other.lat - self.lat) * fraction,
            lng: self.lng + (other.lng - self.lng) * fraction,
        }
    }

    pub(crate) fn to_coord(self) -> geo::Coord<f64> {
        geo::coord! { x: self.lng, y: self.lat }
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
