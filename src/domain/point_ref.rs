use serde::Deserialize;

/// Identifier of a map handle as reported by the host UI.
///
/// Vertex handles are addressed by their position in the ring; midpoint
/// handles carry a string id such as `"mid-2"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPointRef")]
pub enum PointRef {
    Vertex(usize),
    Midpoint(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPointRef {
    Index(usize),
    Id(String),
}

impl From<RawPointRef> for PointRef {
    fn from(raw: RawPointRef) -> Self {
        match raw {
            RawPointRef::Index(i) => PointRef::Vertex(i),
            RawPointRef::Id(s) => PointRef::parse(&s),
        }
    }
}

impl PointRef {
    /// A bare decimal number is a vertex index, anything else is a midpoint id.
    pub fn parse(id: &str) -> Self {
        match id.trim().parse::<usize>() {
            Ok(index) => PointRef::Vertex(index),
            Err(_) => PointRef::Midpoint(id.to_string()),
        }
    }
}

impl std::fmt::Display for PointRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointRef::Vertex(i) => write!(f, "{i}"),
            PointRef::Midpoint(id) => f.write_str(id),
        }
    }
}
