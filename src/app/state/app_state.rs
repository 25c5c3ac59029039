use crate::app::tools::ToolSettings;
use crate::app::{CommandLog, Session};
use crate::shared::EditorOptions;

use super::{EditorToolState, SelectionState};

/// Hauptzustand des Editors
pub struct EditorState {
    /// Verbindung zum Kernel (Datei, Undo, Objekte, Szene)
    pub session: Session,
    /// Selection-State
    pub selection: SelectionState,
    /// Editor-Werkzeug-State
    pub editor: EditorToolState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Aus den Optionen abgeleitete Werkzeug-Parameter
    pub tool_settings: ToolSettings,
    /// Signalisiert dem Host, die Sitzung kontrolliert zu beenden
    pub should_exit: bool,
}

impl EditorState {
    pub fn new(session: Session, options: EditorOptions) -> Self {
        Self {
            session,
            selection: SelectionState::new(),
            editor: EditorToolState::new(),
            command_log: CommandLog::with_capacity(options.command_log_capacity),
            tool_settings: ToolSettings::from_options(&options),
            options,
            should_exit: false,
        }
    }

    /// Anzahl der vom Kernel bestätigten Objekte (für Statusanzeige).
    pub fn object_count(&self) -> usize {
        self.session.with_scene(|scene| {
            scene
                .ids()
                .iter()
                .filter_map(|id| scene.get_mesh(id))
                .filter(|obj| !obj.temporary)
                .count()
        })
    }
}
