pub mod rejection;
pub mod state;
pub mod vertex_editor;

pub use rejection::Rejection;
pub use state::EditorState;
pub use vertex_editor::VertexEditor;
