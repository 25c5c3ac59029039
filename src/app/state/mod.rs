//! Editor-State: zentrale Datenhaltung der Bearbeitungssitzung.

mod app_state;
mod editor;
mod selection;

pub use app_state::EditorState;
pub use editor::{EditorTool, EditorToolState};
pub use selection::SelectionState;
