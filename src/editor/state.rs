use serde::Serialize;

/// Lifecycle of a polygon editing session
///
/// Idle -> Drawing on create, Drawing -> Editing once a ring of at least
/// three points is completed, Editing -> Idle on save or cancel. Loading a
/// stored polygon goes straight from Idle to Editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorState {
    #[default]
    Idle,
    Drawing,
    Editing,
}

impl std::fmt::Display for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EditorState::Idle => "idle",
            EditorState::Drawing => "drawing",
            EditorState::Editing => "editing",
        };
        f.write_str(name)
    }
}
