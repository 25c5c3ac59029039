//! Handler für Undo/Redo. Die Historie selbst führt der Kernel.

use crate::app::EditorState;

/// Macht das letzte Undo-Event rückgängig.
///
/// Während einer Interaktion (Verschieben, offene Vorschau, offenes Undo-Event
/// eines Werkzeugs) wird nichts getan, sonst würde das noch offene Event mitten
/// im Ablauf zurückgenommen.
pub fn undo(state: &mut EditorState) -> anyhow::Result<()> {
    if interaction_running(state) {
        log::debug!("Undo: Interaktion läuft, ignoriert");
        return Ok(());
    }
    state.session.undo_latest()?;
    log::info!("Undo ausgeführt");
    Ok(())
}

/// Stellt das letzte rückgängig gemachte Undo-Event wieder her.
pub fn redo(state: &mut EditorState) -> anyhow::Result<()> {
    if interaction_running(state) {
        log::debug!("Redo: Interaktion läuft, ignoriert");
        return Ok(());
    }
    state.session.redo_latest()?;
    log::info!("Redo ausgeführt");
    Ok(())
}

fn interaction_running(state: &EditorState) -> bool {
    let tool = &state.editor.active;
    state.editor.is_dragging() || tool.has_preview() || tool.has_open_event()
}
