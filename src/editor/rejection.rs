use thiserror::Error;

use super::EditorState;
use crate::domain::Hectares;

/// An editor operation that was refused.
///
/// The `Display` text is the notification shown to the user. The editor is
/// left exactly as it was before the call, except for `AreaCapExceeded`,
/// which discards the drawn shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("A polygon must have at least {min} points ({got} drawn)")]
    TooFewVertices { min: usize, got: usize },

    #[error("A polygon must have at least {min} points")]
    MinimumVertices { min: usize },

    #[error("The drawn area ({area}) exceeds the maximum allowed of {limit}")]
    AreaCapExceeded { area: Hectares, limit: Hectares },

    #[error("Midpoints cannot be deleted; drag {id} to turn it into a vertex")]
    MidpointNotDeletable { id: String },

    #[error("There is no vertex {index}; the polygon has {len}")]
    NoSuchVertex { index: usize, len: usize },

    #[error("Unknown midpoint {id}")]
    UnknownMidpoint { id: String },

    #[error("Cannot {operation} while the editor is {state}")]
    InvalidState {
        operation: &'static str,
        state: EditorState,
    },
}
