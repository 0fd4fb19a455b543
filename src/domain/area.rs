use serde::Serialize;

use crate::config::SQUARE_METERS_PER_HECTARE;

/// Land area in hectares
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Hectares(pub f64);

impl Hectares {
    pub const ZERO: Hectares = Hectares(0.0);

    pub fn from_square_meters(m2: f64) -> Self {
        Hectares(m2 / SQUARE_METERS_PER_HECTARE)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Two-decimal value handed to the persistence form
    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl std::fmt::Display for Hectares {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ha", self.0)
    }
}
