use super::super::state::EditorTool;
use crate::core::ObjectId;
use glam::DVec3;
use serde_json::Value;

/// Mutierende Commands, die vom Controller ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Neue Datei anlegen
    InitFile { file: String },
    /// Datei öffnen
    OpenFile { file: String },
    /// Datei speichern
    SaveFile,
    /// Datei unter neuem Namen speichern
    SaveFileAs { file: String },
    /// Datei schließen
    CloseFile,
    /// Sitzung beenden
    RequestExit,
    /// Letztes Undo-Event rückgängig machen
    Undo,
    /// Letztes Undo-Event wiederherstellen
    Redo,
    /// Werkzeug wechseln (bricht das bisherige ab)
    SetEditorTool { tool: EditorTool },
    /// Klick an das aktive Werkzeug weiterreichen
    ToolMouseDown {
        pos: DVec3,
        hovered: Option<ObjectId>,
    },
    /// Aktives Werkzeug abschließen
    FinishTool {
        pos: DVec3,
        hovered: Option<ObjectId>,
    },
    /// Mausbewegung: Werkzeug-Vorschau und Hover-Markierung
    PointerMove {
        pos: DVec3,
        hovered: Option<ObjectId>,
    },
    /// Objekt selektieren (`additive` = Ctrl-Umschalten)
    SelectObject { id: ObjectId, additive: bool },
    /// Selektion aufheben
    ClearSelection,
    /// Alle selektierten Objekte löschen
    DeleteSelected,
    /// Selektion verschieben (beginnt bei Bedarf die Undo-Klammer)
    DragSelection { id: ObjectId, delta: DVec3 },
    /// Verschieben abschließen
    EndDrag,
    /// Verschieben verwerfen
    AbortDrag,
    /// Modifier-Zustand setzen
    SetCtrl { down: bool },
    SetShift { down: bool },
    /// Selektion in die Zwischenablage
    CopySelection,
    /// Zwischenablage einfügen
    PasteClipboard,
    /// Eigenschaft auf alle selektierten Objekte setzen
    SetSelectionProperty { prop: String, value: Value },
}
