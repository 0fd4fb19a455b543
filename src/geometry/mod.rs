pub mod area;
pub mod distance;
pub mod interpolate;
pub mod measures;

pub use area::{
    AreaCapability, CapabilityError, CapabilityStatus, EllipsoidalArea, PolygonAreaProvider,
    SphericalArea, polygon_area_hectares, provider_for,
};
pub use distance::{distance, haversine_distance};
pub use interpolate::{edge_midpoints, interpolate};
pub use measures::{Bounds, centroid, perimeter_m};
