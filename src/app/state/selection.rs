use crate::core::ObjectId;
use indexmap::IndexSet;

/// Auswahlbezogener Zustand
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Selektierte Objekte in Auswahl-Reihenfolge
    pub selected: IndexSet<ObjectId>,
    /// Beim Kopieren gemerkte IDs
    pub clipboard: Vec<ObjectId>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.selected.contains(id)
    }

    /// Kopie der selektierten IDs (für Kernel-Aufrufe).
    pub fn ids(&self) -> Vec<ObjectId> {
        self.selected.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
