use serde::Deserialize;
use std::path::Path;

use crate::domain::{PointRef, Vertex};
use crate::persist::PersistError;

/// A discrete interaction reported by the map UI
///
/// Scripts are JSON arrays of objects tagged by `"event"`, for example
/// `{"event": "drag_midpoint", "id": "mid-2", "to": {"lat": 1.0, "lng": 2.0}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditEvent {
    Begin,
    Load {
        coordenadas: Vec<Vertex>,
    },
    AddPoint {
        point: Vertex,
    },
    /// Drawing finished; without a `path` the appended points are used
    Complete {
        #[serde(default)]
        path: Option<Vec<Vertex>>,
    },
    DragVertex {
        index: usize,
        to: Vertex,
    },
    DragMidpoint {
        id: String,
        to: Vertex,
    },
    Delete {
        target: PointRef,
    },
    Select {
        target: PointRef,
    },
    ClearSelection,
    Save,
    Cancel,
}

impl EditEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditEvent::Begin => "begin",
            EditEvent::Load { .. } => "load",
            EditEvent::AddPoint { .. } => "add_point",
            EditEvent::Complete { .. } => "complete",
            EditEvent::DragVertex { .. } => "drag_vertex",
            EditEvent::DragMidpoint { .. } => "drag_midpoint",
            EditEvent::Delete { .. } => "delete",
            EditEvent::Select { .. } => "select",
            EditEvent::ClearSelection => "clear_selection",
            EditEvent::Save => "save",
            EditEvent::Cancel => "cancel",
        }
    }
}

pub fn parse_script(json: &str) -> Result<Vec<EditEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_script(path: &Path) -> Result<Vec<EditEvent>, PersistError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&contents).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let json = r#"[
            {"event": "begin"},
            {"event": "add_point", "point": {"lat": 0.0, "lng": 0.0}},
            {"event": "complete"},
            {"event": "drag_vertex", "index": 1, "to": {"lat": 0.5, "lng": 0.5}},
            {"event": "drag_midpoint", "id": "mid-0", "to": {"lat": 0.1, "lng": 0.2}},
            {"event": "delete", "target": 2},
            {"event": "delete", "target": "mid-1"},
            {"event": "select", "target": "3"},
            {"event": "clear_selection"},
            {"event": "save"}
        ]"#;

        let events = parse_script(json).unwrap();
        assert_eq!(events.len(), 10);
        assert_eq!(events[0], EditEvent::Begin);
        assert_eq!(events[2], EditEvent::Complete { path: None });
        assert_eq!(
            events[5],
            EditEvent::Delete {
                target: PointRef::Vertex(2)
            }
        );
        assert_eq!(
            events[6],
            EditEvent::Delete {
                target: PointRef::Midpoint("mid-1".to_string())
            }
        );
        assert_eq!(
            events[7],
            EditEvent::Select {
                target: PointRef::Vertex(3)
            }
        );
        assert_eq!(events[9].name(), "save");
    }

    #[test]
    fn test_parse_script_rejects_bad_point() {
        let json = r#"[{"event": "add_point", "point": {"lat": 95.0, "lng": 0.0}}]"#;
        assert!(parse_script(json).is_err());
    }

    #[test]
    fn test_parse_script_unknown_event() {
        let json = r#"[{"event": "rotate"}]"#;
        assert!(parse_script(json).is_err());
    }
}
