//! Handler für Kopieren und Einfügen.

use super::selection;
use crate::app::EditorState;

/// Merkt sich die aktuell selektierten IDs.
pub fn copy(state: &mut EditorState) {
    state.selection.clipboard = state.selection.ids();
    log::debug!("{} Objekte in der Zwischenablage", state.selection.clipboard.len());
}

/// Fügt versetzte Kopien der gemerkten Objekte ein.
///
/// Ein Undo-Event umschließt `copy_objs`. Die Selektion wird ersetzt, sobald
/// alle Kopien gerendert sind.
pub async fn paste(state: &mut EditorState) -> anyhow::Result<()> {
    if state.selection.clipboard.is_empty() {
        log::debug!("Einfügen: Zwischenablage leer");
        return Ok(());
    }
    let session = state.session.clone();
    let event = session.begin_undo_event("Paste")?;
    let copies = session.copy_objs(event, &state.selection.clipboard, state.options.paste_delta());
    session.end_undo_event(event)?;

    let ids = copies.await?;
    session.await_rendered(&ids).await?;
    selection::replace(state, &ids);
    log::info!("{} Objekte eingefügt", ids.len());
    Ok(())
}
