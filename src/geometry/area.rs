//! Polygon area in hectares over a pluggable area capability
//!
//! The area primitive itself comes from `geo`; this module only decides
//! when it may be trusted:
//! - fewer than 3 vertices is exactly 0
//! - a capability that is not loaded yet answers 0 ("not yet computed")

use geo::{ChamberlainDuquetteArea, GeodesicArea, LineString, Polygon};
use thiserror::Error;

use crate::config::{AreaModel, EARTH_RADIUS_M, MIN_VERTICES};
use crate::domain::{Hectares, Vertex};

/// Something able to measure a closed lat/lng ring in square meters.
///
/// `None` means the capability is not available right now.
pub trait PolygonAreaProvider {
    fn area_m2(&self, ring: &[Vertex]) -> Option<f64>;
}

impl<P: PolygonAreaProvider + ?Sized> PolygonAreaProvider for Box<P> {
    fn area_m2(&self, ring: &[Vertex]) -> Option<f64> {
        (**self).area_m2(ring)
    }
}

impl<P: PolygonAreaProvider + ?Sized> PolygonAreaProvider for &P {
    fn area_m2(&self, ring: &[Vertex]) -> Option<f64> {
        (**self).area_m2(ring)
    }
}

fn to_polygon(ring: &[Vertex]) -> Polygon<f64> {
    let exterior: LineString<f64> = ring.iter().map(|v| v.to_coord()).collect();
    // Polygon::new closes the ring
    Polygon::new(exterior, vec![])
}

/// Spherical-excess area on a sphere of `radius_m`
///
/// `geo` measures on the WGS84 equatorial radius; other radii rescale that
/// result by the squared radius ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalArea {
    pub radius_m: f64,
}

impl SphericalArea {
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m }
    }
}

impl Default for SphericalArea {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_M)
    }
}

impl PolygonAreaProvider for SphericalArea {
    fn area_m2(&self, ring: &[Vertex]) -> Option<f64> {
        let scale = self.radius_m / EARTH_RADIUS_M;
        Some(to_polygon(ring).chamberlain_duquette_unsigned_area() * scale * scale)
    }
}

/// Area on the WGS84 ellipsoid; the configured sphere radius does not apply
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipsoidalArea;

impl PolygonAreaProvider for EllipsoidalArea {
    fn area_m2(&self, ring: &[Vertex]) -> Option<f64> {
        Some(to_polygon(ring).geodesic_area_unsigned())
    }
}

pub fn provider_for(model: AreaModel, radius_m: f64) -> Box<dyn PolygonAreaProvider> {
    match model {
        AreaModel::Spherical => Box::new(SphericalArea::new(radius_m)),
        AreaModel::Geodesic => Box::new(EllipsoidalArea),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapabilityError {
    #[error("area capability failed to load: {0}")]
    LoadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug)]
enum Readiness<P> {
    Pending,
    Ready(P),
    Failed(String),
}

/// An area provider that becomes usable only once its loader resolves.
///
/// Until then every measurement answers `None`, which the hectare wrapper
/// turns into 0. Callers re-measure after a successful `resolve`.
#[derive(Debug)]
pub struct AreaCapability<P> {
    state: Readiness<P>,
}

impl<P> AreaCapability<P> {
    pub fn pending() -> Self {
        Self {
            state: Readiness::Pending,
        }
    }

    pub fn ready(provider: P) -> Self {
        Self {
            state: Readiness::Ready(provider),
        }
    }

    /// Complete initialization with the outcome of the loader.
    ///
    /// A failed load leaves the capability unusable but may be resolved again.
    pub fn resolve<E: std::fmt::Display>(
        &mut self,
        result: Result<P, E>,
    ) -> Result<(), CapabilityError> {
        match result {
            Ok(provider) => {
                tracing::info!("area capability ready");
                self.state = Readiness::Ready(provider);
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(%reason, "area capability failed to load");
                self.state = Readiness::Failed(reason.clone());
                Err(CapabilityError::LoadFailed(reason))
            }
        }
    }

    pub fn load_with<F, E>(&mut self, loader: F) -> Result<(), CapabilityError>
    where
        F: FnOnce() -> Result<P, E>,
        E: std::fmt::Display,
    {
        self.resolve(loader())
    }

    pub fn status(&self) -> CapabilityStatus {
        match self.state {
            Readiness::Pending => CapabilityStatus::Pending,
            Readiness::Ready(_) => CapabilityStatus::Ready,
            Readiness::Failed(_) => CapabilityStatus::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, Readiness::Ready(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            Readiness::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<P: PolygonAreaProvider> PolygonAreaProvider for AreaCapability<P> {
    fn area_m2(&self, ring: &[Vertex]) -> Option<f64> {
        match &self.state {
            Readiness::Ready(provider) => provider.area_m2(ring),
            Readiness::Pending | Readiness::Failed(_) => None,
        }
    }
}

/// Area enclosed by `vertices` in hectares, 0 when it cannot be computed yet
pub fn polygon_area_hectares<P>(provider: &P, vertices: &[Vertex]) -> Hectares
where
    P: PolygonAreaProvider + ?Sized,
{
    if vertices.len() < MIN_VERTICES {
        return Hectares::ZERO;
    }

    match provider.area_m2(vertices) {
        Some(m2) if m2.is_finite() && m2 > 0.0 => Hectares::from_square_meters(m2),
        Some(_) => Hectares::ZERO,
        None => {
            tracing::debug!("area capability not ready, reporting 0");
            Hectares::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(lat: f64, lng: f64) -> Vertex {
        Vertex::new(lat, lng).unwrap()
    }

    /// Square of `side_deg` degrees anchored at the equator
    fn equator_square(side_deg: f64) -> Vec<Vertex> {
        vec![
            v(0.0, 0.0),
            v(0.0, side_deg),
            v(side_deg, side_deg),
            v(side_deg, 0.0),
        ]
    }

    struct Fixed(f64);

    impl PolygonAreaProvider for Fixed {
        fn area_m2(&self, _ring: &[Vertex]) -> Option<f64> {
            Some(self.0)
        }
    }

    #[test]
    fn test_fewer_than_three_is_zero() {
        assert_eq!(polygon_area_hectares(&SphericalArea::default(), &[]), Hectares::ZERO);
        let two = [v(0.0, 0.0), v(1.0, 1.0)];
        assert_eq!(polygon_area_hectares(&SphericalArea::default(), &two), Hectares::ZERO);
        assert_eq!(polygon_area_hectares(&Fixed(5e6), &two), Hectares::ZERO);
    }

    #[test]
    fn test_square_meters_to_hectares() {
        let ring = equator_square(0.01);
        assert_eq!(polygon_area_hectares(&Fixed(1_500_000.0), &ring), Hectares(150.0));
    }

    #[test]
    fn test_spherical_area_of_small_square() {
        // 0.011° ≈ 1224.5m on the equatorial radius, so ≈ 149.9 ha
        let ring = equator_square(0.011);
        let area = polygon_area_hectares(&SphericalArea::default(), &ring).value();
        assert!((area - 149.9).abs() < 1.0, "area was {area}");
    }

    #[test]
    fn test_ellipsoidal_area_close_to_spherical() {
        let ring = equator_square(0.011);
        let spherical = polygon_area_hectares(&SphericalArea::default(), &ring).value();
        let ellipsoidal = polygon_area_hectares(&EllipsoidalArea, &ring).value();
        assert!((spherical - ellipsoidal).abs() / spherical < 0.02);
    }

    #[test]
    fn test_area_ignores_winding() {
        let ring = equator_square(0.005);
        let mut reversed = ring.clone();
        reversed.reverse();
        let forward = polygon_area_hectares(&SphericalArea::default(), &ring).value();
        let backward = polygon_area_hectares(&SphericalArea::default(), &reversed).value();
        assert!(forward > 0.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_area_idempotent() {
        let ring = equator_square(0.004);
        let first = polygon_area_hectares(&SphericalArea::default(), &ring);
        let second = polygon_area_hectares(&SphericalArea::default(), &ring);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pending_capability_reports_zero() {
        let ring = equator_square(0.01);
        let mut capability = AreaCapability::<SphericalArea>::pending();
        assert_eq!(capability.status(), CapabilityStatus::Pending);
        assert_eq!(polygon_area_hectares(&capability, &ring), Hectares::ZERO);

        capability
            .load_with(|| Ok::<_, CapabilityError>(SphericalArea::default()))
            .unwrap();
        assert!(capability.is_ready());
        assert!(polygon_area_hectares(&capability, &ring).value() > 100.0);
    }

    #[test]
    fn test_failed_capability_reports_zero_and_can_retry() {
        let ring = equator_square(0.01);
        let mut capability = AreaCapability::<SphericalArea>::pending();

        let err = capability.resolve(Err::<SphericalArea, _>("script blocked"));
        assert_eq!(
            err,
            Err(CapabilityError::LoadFailed("script blocked".to_string()))
        );
        assert_eq!(capability.status(), CapabilityStatus::Failed);
        assert_eq!(capability.failure_reason(), Some("script blocked"));
        assert_eq!(polygon_area_hectares(&capability, &ring), Hectares::ZERO);

        capability.resolve(Ok::<_, String>(SphericalArea::default())).unwrap();
        assert_eq!(capability.status(), CapabilityStatus::Ready);
    }

    #[test]
    fn test_spherical_area_follows_radius() {
        let ring = vec![v(0.0, 0.0), v(0.0, 0.01), v(0.01, 0.0)];
        let full = polygon_area_hectares(&SphericalArea::default(), &ring).value();
        let half_radius = SphericalArea::new(EARTH_RADIUS_M / 2.0);
        let half = polygon_area_hectares(&half_radius, &ring).value();
        assert!(full > 0.0);
        assert!((half - full / 4.0).abs() < 1e-9);

        let tiny = provider_for(AreaModel::Spherical, 1.0);
        assert!(polygon_area_hectares(&tiny, &ring).value() < 1e-6);
    }

    #[test]
    fn test_provider_for_model() {
        let ring = equator_square(0.002);
        let boxed = provider_for(AreaModel::Geodesic, EARTH_RADIUS_M);
        assert!(polygon_area_hectares(&boxed, &ring).value() > 0.0);
    }
}
