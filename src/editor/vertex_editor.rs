use tracing::{debug, info, warn};

use super::{EditorState, Rejection};
use crate::config::EditorConfig;
use crate::domain::{Hectares, Midpoint, PointRef, Vertex};
use crate::geometry::{PolygonAreaProvider, edge_midpoints, polygon_area_hectares};
use crate::persist::SavePayload;

/// Owns the vertex list of the one polygon being drawn or edited.
///
/// Area and midpoints are derived state: every operation that changes the
/// vertex list recomputes both before it returns. Refused operations come
/// back as [`Rejection`] and leave the editor untouched.
#[derive(Debug)]
pub struct VertexEditor<P> {
    config: EditorConfig,
    provider: P,
    state: EditorState,
    vertices: Vec<Vertex>,
    midpoints: Vec<Midpoint>,
    area: Hectares,
    selected: Option<PointRef>,
}

impl<P: PolygonAreaProvider> VertexEditor<P> {
    pub fn new(config: EditorConfig, provider: P) -> Self {
        Self {
            config,
            provider,
            state: EditorState::Idle,
            vertices: Vec::new(),
            midpoints: Vec::new(),
            area: Hectares::ZERO,
            selected: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn midpoints(&self) -> &[Midpoint] {
        &self.midpoints
    }

    pub fn area(&self) -> Hectares {
        self.area
    }

    pub fn selected(&self) -> Option<&PointRef> {
        self.selected.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access for completing the capability's initialization.
    /// Call [`refresh_area`](Self::refresh_area) once it reports ready.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    fn limit(&self) -> Hectares {
        Hectares(self.config.max_area_hectares)
    }

    fn recompute(&mut self) {
        self.area = polygon_area_hectares(&self.provider, &self.vertices);
        self.midpoints = edge_midpoints(&self.vertices);
        debug!(
            vertices = self.vertices.len(),
            midpoints = self.midpoints.len(),
            area_ha = self.area.value(),
            "recomputed polygon"
        );
    }

    fn require(&self, expected: EditorState, operation: &'static str) -> Result<(), Rejection> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.reject(Rejection::InvalidState {
                operation,
                state: self.state,
            }))
        }
    }

    fn reject(&self, rejection: Rejection) -> Rejection {
        warn!(state = %self.state, "{}", rejection);
        rejection
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.selected = None;
        self.recompute();
    }

    fn transition(&mut self, to: EditorState) {
        info!(from = %self.state, %to, "editor state change");
        self.state = to;
    }

    /// Enter create mode with an empty polygon
    pub fn begin_drawing(&mut self) -> Result<(), Rejection> {
        self.require(EditorState::Idle, "start drawing")?;
        self.reset();
        self.transition(EditorState::Drawing);
        Ok(())
    }

    /// Open a stored polygon for editing
    pub fn load(&mut self, vertices: Vec<Vertex>) -> Result<(), Rejection> {
        self.require(EditorState::Idle, "load a polygon")?;
        let min = self.config.vertex_floor();
        if vertices.len() < min {
            return Err(self.reject(Rejection::TooFewVertices {
                min,
                got: vertices.len(),
            }));
        }

        self.vertices = vertices;
        self.selected = None;
        self.recompute();
        self.transition(EditorState::Editing);
        Ok(())
    }

    pub fn append_vertex(&mut self, vertex: Vertex) -> Result<(), Rejection> {
        self.require(EditorState::Drawing, "add a point")?;
        self.vertices.push(vertex);
        self.recompute();
        Ok(())
    }

    /// Commit a finished drawing.
    ///
    /// A path over the area cap is discarded: the editor keeps drawing with
    /// an empty polygon and a zero area.
    pub fn complete_polygon(&mut self, path: Vec<Vertex>) -> Result<(), Rejection> {
        self.require(EditorState::Drawing, "complete the polygon")?;
        let min = self.config.vertex_floor();
        if path.len() < min {
            return Err(self.reject(Rejection::TooFewVertices {
                min,
                got: path.len(),
            }));
        }

        let area = polygon_area_hectares(&self.provider, &path);
        let limit = self.limit();
        if area > limit {
            self.reset();
            return Err(self.reject(Rejection::AreaCapExceeded { area, limit }));
        }

        self.vertices = path;
        self.recompute();
        self.transition(EditorState::Editing);
        Ok(())
    }

    /// Complete with the points appended so far
    pub fn complete_drawing(&mut self) -> Result<(), Rejection> {
        let path = self.vertices.clone();
        self.complete_polygon(path)
    }

    pub fn move_vertex(&mut self, index: usize, position: Vertex) -> Result<(), Rejection> {
        self.require(EditorState::Editing, "move a vertex")?;
        let len = self.vertices.len();
        if index >= len {
            return Err(self.reject(Rejection::NoSuchVertex { index, len }));
        }

        self.vertices[index] = position;
        self.recompute();
        Ok(())
    }

    /// Turn a dragged midpoint into a permanent vertex after its edge start
    pub fn insert_vertex_at_midpoint(
        &mut self,
        midpoint_id: &str,
        position: Vertex,
    ) -> Result<(), Rejection> {
        self.require(EditorState::Editing, "insert a vertex")?;
        let Some(at) = self
            .midpoints
            .iter()
            .find(|m| m.id == midpoint_id)
            .map(Midpoint::insertion_index)
        else {
            return Err(self.reject(Rejection::UnknownMidpoint {
                id: midpoint_id.to_string(),
            }));
        };

        self.vertices.insert(at, position);
        self.recompute();
        Ok(())
    }

    pub fn delete(&mut self, target: &PointRef) -> Result<(), Rejection> {
        self.require(EditorState::Editing, "delete a point")?;
        let index = match target {
            PointRef::Vertex(index) => *index,
            PointRef::Midpoint(id) => {
                return Err(self.reject(Rejection::MidpointNotDeletable { id: id.clone() }));
            }
        };

        let len = self.vertices.len();
        if index >= len {
            return Err(self.reject(Rejection::NoSuchVertex { index, len }));
        }
        let min = self.config.vertex_floor();
        if len - 1 < min {
            return Err(self.reject(Rejection::MinimumVertices { min }));
        }

        self.vertices.remove(index);
        // indices shifted, any selection is stale
        self.selected = None;
        self.recompute();
        Ok(())
    }

    pub fn delete_vertex(&mut self, index: usize) -> Result<(), Rejection> {
        self.delete(&PointRef::Vertex(index))
    }

    pub fn select(&mut self, target: PointRef) {
        self.selected = Some(target);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Re-measure after the area capability became ready
    pub fn refresh_area(&mut self) -> Hectares {
        self.area = polygon_area_hectares(&self.provider, &self.vertices);
        self.area
    }

    /// Finish the session and hand the polygon to the persistence layer
    pub fn save(&mut self) -> Result<SavePayload, Rejection> {
        self.require(EditorState::Editing, "save")?;
        let payload = SavePayload::new(std::mem::take(&mut self.vertices), self.area);
        self.reset();
        self.transition(EditorState::Idle);
        Ok(payload)
    }

    /// Drop whatever is being drawn or edited
    pub fn cancel(&mut self) {
        self.reset();
        if self.state != EditorState::Idle {
            self.transition(EditorState::Idle);
        }
    }
}
