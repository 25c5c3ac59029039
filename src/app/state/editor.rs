use crate::app::tools::ActiveTool;
use crate::app::undo::DragUndo;
use crate::core::ObjectId;
use serde::{Deserialize, Serialize};

/// Art des aktiven Editor-Werkzeugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorTool {
    /// Standard: Objekte selektieren und verschieben
    #[default]
    None,
    /// Wandketten zeichnen
    Wall,
    /// Türen setzen
    Door,
    /// Bemaßungsketten
    Dimension,
    /// Deckenplatten
    Slab,
}

/// Zustand des aktuellen Editor-Werkzeugs
#[derive(Default)]
pub struct EditorToolState {
    /// Aktives Werkzeug mit Interaktionszustand
    pub active: ActiveTool,
    /// Ctrl/Cmd gedrückt (additive Selektion)
    pub ctrl_down: bool,
    /// Shift gedrückt (Achsensperre beim Verschieben)
    pub shift_down: bool,
    /// Objekt unter dem Mauszeiger
    pub hovered: Option<ObjectId>,
    /// Laufendes Verschieben der Selektion
    pub drag: Option<DragUndo>,
}

impl EditorToolState {
    /// Erstellt den Standard-Werkzeugzustand (kein Werkzeug aktiv).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> EditorTool {
        self.active.kind()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
