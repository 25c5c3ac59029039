//! Handler für Datei-Operationen (Neu, Öffnen, Speichern, Schließen).

use crate::app::tools::ActiveTool;
use crate::app::EditorState;
use anyhow::Context;

/// Beendet laufende Interaktionen vor einem Dateiwechsel.
///
/// Offene Undo-Events werden noch gegen die alte Datei verworfen.
fn reset_interaction(state: &mut EditorState) {
    if let Err(e) = state.editor.active.cancel(&state.session) {
        log::warn!("Werkzeug konnte nicht abgebrochen werden: {:#}", e);
    }
    state.editor.active = ActiveTool::None;
    if let Some(drag) = state.editor.drag.take() {
        if let Err(e) = drag.abort(&state.session) {
            log::warn!("Verschieben konnte nicht verworfen werden: {:#}", e);
        }
    }
    state.editor.hovered = None;
    state.selection.selected.clear();
    state.selection.clipboard.clear();
}

/// Legt eine neue Datei an.
pub fn init(state: &mut EditorState, file: String) -> anyhow::Result<()> {
    reset_interaction(state);
    state
        .session
        .init_file(&file)
        .with_context(|| format!("Datei {} konnte nicht angelegt werden", file))
}

/// Öffnet eine bestehende Datei.
pub fn open(state: &mut EditorState, file: String) -> anyhow::Result<()> {
    reset_interaction(state);
    state
        .session
        .open_file(&file)
        .with_context(|| format!("Datei {} konnte nicht geöffnet werden", file))
}

/// Speichert die aktuelle Datei.
pub fn save(state: &mut EditorState) -> anyhow::Result<()> {
    state.session.save_file().context("Speichern fehlgeschlagen")?;
    log::info!("Datei gespeichert: {}", state.session.file().unwrap_or_default());
    Ok(())
}

/// Speichert unter neuem Namen und arbeitet danach auf dieser Datei weiter.
pub fn save_as(state: &mut EditorState, file: String) -> anyhow::Result<()> {
    state
        .session
        .save_as_file(&file)
        .with_context(|| format!("Speichern als {} fehlgeschlagen", file))?;
    log::info!("Datei gespeichert als: {}", file);
    Ok(())
}

/// Schließt die aktuelle Datei.
pub fn close(state: &mut EditorState) -> anyhow::Result<()> {
    reset_interaction(state);
    state.session.close_file().context("Schließen fehlgeschlagen")
}
