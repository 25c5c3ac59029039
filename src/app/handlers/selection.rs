//! Handler für Selektion, Löschen und Verschieben.

use crate::app::undo::DragUndo;
use crate::app::EditorState;
use crate::core::ObjectId;
use crate::render::Material;
use glam::DVec3;

/// Selektiert ein Objekt.
///
/// `additive`: Mitgliedschaft umschalten. Sonst Einzelauswahl; ist das Objekt
/// bereits allein selektiert, ändert sich nichts.
pub fn select_object(state: &mut EditorState, id: ObjectId, additive: bool) {
    let session = &state.session;
    let selected = &mut state.selection.selected;

    if additive {
        if selected.shift_remove(&id) {
            session.set_material(id, Material::Default);
        } else {
            selected.insert(id);
            session.set_material(id, Material::Selected);
        }
        return;
    }

    for other in selected.drain(..).filter(|other| *other != id) {
        session.set_material(other, Material::Default);
    }
    selected.insert(id);
    session.set_material(id, Material::Selected);
}

/// Hebt die Selektion auf und stellt das Standard-Material wieder her.
pub fn clear(state: &mut EditorState) {
    for id in state.selection.selected.drain(..) {
        state.session.set_material(id, Material::Default);
    }
}

/// Ersetzt die Selektion durch `ids`.
pub fn replace(state: &mut EditorState, ids: &[ObjectId]) {
    clear(state);
    for id in ids {
        state.selection.selected.insert(*id);
        state.session.set_material(*id, Material::Selected);
    }
}

/// Entfernt vom Kernel gelöschte Objekte aus Selektion und Zwischenablage.
pub fn forget_removed(state: &mut EditorState) {
    let removed = state.session.take_removed();
    if removed.is_empty() {
        return;
    }
    let selection = &mut state.selection;
    selection.selected.retain(|id| !removed.contains(id));
    selection.clipboard.retain(|id| !removed.contains(id));
    log::debug!("{} gelöschte Objekte vergessen", removed.len());
}

/// Löscht alle selektierten Objekte in einem Undo-Event.
pub fn delete_selected(state: &mut EditorState) -> anyhow::Result<()> {
    if state.selection.is_empty() {
        log::debug!("Löschen: keine Selektion");
        return Ok(());
    }
    let ids = state.selection.ids();
    let event = state.session.begin_undo_event("Delete")?;
    for id in &ids {
        if let Err(e) = state.session.delete_object(event, *id) {
            state.session.cancel_event(event)?;
            return Err(e.into());
        }
    }
    state.session.end_undo_event(event)?;
    state.selection.selected.clear();
    log::info!("{} Objekte gelöscht", ids.len());
    Ok(())
}

/// Sperrt eine Verschiebung auf die dominante Grundriss-Achse.
pub fn lock_to_axis(delta: DVec3) -> DVec3 {
    if delta.x.abs() >= delta.y.abs() {
        DVec3::new(delta.x, 0.0, 0.0)
    } else {
        DVec3::new(0.0, delta.y, 0.0)
    }
}

/// Verschiebt die Selektion um `delta` (ein Frame beim Ziehen an `id`).
///
/// Im ersten Frame wird ein nicht selektiertes `id` selektiert und die
/// Undo-Klammer (Snapshots + suspend) geöffnet; danach nur noch `move_objs`.
pub fn drag(state: &mut EditorState, id: ObjectId, delta: DVec3) -> anyhow::Result<()> {
    if state.editor.drag.is_none() {
        if !state.selection.contains(&id) {
            let additive = state.editor.ctrl_down;
            select_object(state, id, additive);
        }
        if state.selection.is_empty() {
            return Ok(());
        }
        let undo = DragUndo::start(&state.session, "Move", &state.selection.ids())?;
        log::debug!("Verschieben beginnt ({} Objekte)", undo.ids().len());
        state.editor.drag = Some(undo);
    }

    let delta = if state.editor.shift_down {
        lock_to_axis(delta)
    } else {
        delta
    };
    if let Some(undo) = state.editor.drag.as_ref() {
        let _ = state.session.move_objs(undo.event(), undo.ids(), delta);
    }
    Ok(())
}

/// Schließt das Verschieben ab (Maustaste losgelassen).
pub fn end_drag(state: &mut EditorState) -> anyhow::Result<()> {
    if let Some(undo) = state.editor.drag.take() {
        undo.finish(&state.session)?;
        log::debug!("Verschieben abgeschlossen");
    }
    Ok(())
}

/// Verwirft das Verschieben (Escape).
pub fn abort_drag(state: &mut EditorState) -> anyhow::Result<()> {
    if let Some(undo) = state.editor.drag.take() {
        undo.abort(&state.session)?;
        log::debug!("Verschieben verworfen");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_to_axis_keeps_dominant_component() {
        assert_eq!(lock_to_axis(DVec3::new(3.0, -1.0, 2.0)), DVec3::new(3.0, 0.0, 0.0));
        assert_eq!(lock_to_axis(DVec3::new(0.5, -4.0, 0.0)), DVec3::new(0.0, -4.0, 0.0));
    }
}
