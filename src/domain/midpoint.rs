use serde::Serialize;

use super::Vertex;

const MIDPOINT_ID_PREFIX: &str = "mid-";

/// Draggable handle halfway along the edge from vertex `original_index`
/// to vertex `original_index + 1 (mod N)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Midpoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub original_index: usize,
}

impl Midpoint {
    pub fn new(original_index: usize, position: Vertex) -> Self {
        Self {
            id: midpoint_id(original_index),
            lat: position.lat(),
            lng: position.lng(),
            original_index,
        }
    }

    /// Index at which a vertex dragged out of this midpoint is inserted
    pub fn insertion_index(&self) -> usize {
        self.original_index + 1
    }
}

pub fn midpoint_id(original_index: usize) -> String {
    format!("{MIDPOINT_ID_PREFIX}{original_index}")
}
