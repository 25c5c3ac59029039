//! Application-Layer: Session, Controller, State, Events und Werkzeuge.

pub mod command_log;
pub mod controller;
mod error;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod pending;
pub mod session;
/// Editor-State und Controller-Zustand
///
/// Dieses Modul verwaltet den Zustand der Sitzung (Selektion, Werkzeug, Optionen).
pub mod state;
#[cfg(test)]
pub(crate) mod test_support;
pub mod tools;
pub mod undo;

pub use command_log::CommandLog;
pub use controller::EditorController;
pub use error::SessionError;
pub use events::{AppCommand, AppIntent};
pub use pending::{Pending, PendingRegistry};
pub use session::{PendingAll, Session, UpdateLoop};
pub use state::{EditorState, EditorTool, EditorToolState, SelectionState};
pub use undo::{DragUndo, UndoScope};
