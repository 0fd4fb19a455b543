use serde::Serialize;

use super::EditEvent;
use crate::domain::{Hectares, Midpoint, Vertex};
use crate::editor::{EditorState, VertexEditor};
use crate::geometry::PolygonAreaProvider;
use crate::persist::SavePayload;

/// A notification raised while replaying, tied to the event that caused it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub step: usize,
    pub event: &'static str,
    pub message: String,
}

/// What the host UI would be showing once the script has run
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub notifications: Vec<Notification>,
    pub saved: Option<SavePayload>,
    pub state: EditorState,
    pub vertices: Vec<Vertex>,
    pub midpoints: Vec<Midpoint>,
    pub area: Hectares,
}

/// Apply events in order.
///
/// A refused event becomes a notification and the replay carries on, the
/// same way the UI keeps the session open after showing a message.
pub fn replay<P: PolygonAreaProvider>(
    editor: &mut VertexEditor<P>,
    events: &[EditEvent],
) -> ReplayReport {
    let mut notifications = Vec::new();
    let mut saved = None;
    let mut applied = 0;

    for (step, event) in events.iter().enumerate() {
        let result = match event {
            EditEvent::Begin => editor.begin_drawing(),
            EditEvent::Load { coordenadas } => editor.load(coordenadas.clone()),
            EditEvent::AddPoint { point } => editor.append_vertex(*point),
            EditEvent::Complete { path: Some(path) } => editor.complete_polygon(path.clone()),
            EditEvent::Complete { path: None } => editor.complete_drawing(),
            EditEvent::DragVertex { index, to } => editor.move_vertex(*index, *to),
            EditEvent::DragMidpoint { id, to } => editor.insert_vertex_at_midpoint(id, *to),
            EditEvent::Delete { target } => editor.delete(target),
            EditEvent::Select { target } => {
                editor.select(target.clone());
                Ok(())
            }
            EditEvent::ClearSelection => {
                editor.clear_selection();
                Ok(())
            }
            EditEvent::Save => editor.save().map(|payload| {
                saved = Some(payload);
            }),
            EditEvent::Cancel => {
                editor.cancel();
                Ok(())
            }
        };

        match result {
            Ok(()) => applied += 1,
            Err(rejection) => notifications.push(Notification {
                step,
                event: event.name(),
                message: rejection.to_string(),
            }),
        }
    }

    ReplayReport {
        applied,
        notifications,
        saved,
        state: editor.state(),
        vertices: editor.vertices().to_vec(),
        midpoints: editor.midpoints().to_vec(),
        area: editor.area(),
    }
}
