use super::super::state::EditorTool;
use crate::core::ObjectId;
use glam::DVec3;
use serde_json::Value;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
/// Alle Positionen liegen im Modellraum.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Neue Datei anlegen (`None` = Standard-Dateiname aus den Optionen)
    NewFileRequested { file: Option<String> },
    /// Bestehende Datei öffnen
    OpenFileRequested { file: String },
    /// Datei speichern
    SaveRequested,
    /// Datei unter neuem Namen speichern
    SaveAsRequested { file: String },
    /// Datei schließen
    CloseFileRequested,
    /// Sitzung beenden
    ExitRequested,
    /// Undo (Mod+Z)
    UndoRequested,
    /// Redo (Mod+Y)
    RedoRequested,
    /// Werkzeug aus der Werkzeugleiste gewählt
    ToolSelected { tool: EditorTool },
    /// Linksklick in den Viewport
    ViewportClicked {
        pos: DVec3,
        hovered: Option<ObjectId>,
    },
    /// Rechtsklick in den Viewport
    ViewportRightClicked {
        pos: DVec3,
        hovered: Option<ObjectId>,
    },
    /// Mausbewegung über dem Viewport
    PointerMoved {
        pos: DVec3,
        hovered: Option<ObjectId>,
    },
    /// Objekt wird gezogen (Delta seit dem letzten Frame)
    ObjectDragged { id: ObjectId, delta: DVec3 },
    /// Ziehen beendet (Maustaste losgelassen)
    ObjectDragEnded,
    /// Entf-Taste
    DeleteRequested,
    /// Escape-Taste
    EscapePressed,
    /// Ctrl/Cmd gedrückt oder losgelassen
    CtrlChanged { down: bool },
    /// Shift gedrückt oder losgelassen
    ShiftChanged { down: bool },
    /// Selektion in die Zwischenablage (Mod+C)
    CopyRequested,
    /// Zwischenablage einfügen (Mod+V)
    PasteRequested,
    /// Eigenschaft im Eigenschaften-Panel geändert
    PropertyEdited { prop: String, value: Value },
}
