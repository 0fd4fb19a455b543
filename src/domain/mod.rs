pub mod area;
pub mod midpoint;
pub mod point_ref;
pub mod vertex;

pub use area::Hectares;
pub use midpoint::{Midpoint, midpoint_id};
pub use point_ref::PointRef;
pub use vertex::{Vertex, VertexError};
