//! Handler für Editor-Werkzeug, Zeiger-Ereignisse und Modifier.

use crate::app::state::EditorTool;
use crate::app::tools::ActiveTool;
use crate::app::EditorState;
use crate::core::ObjectId;
use crate::render::RenderedObject;
use glam::DVec3;

fn resolve(state: &EditorState, hovered: Option<ObjectId>) -> Option<RenderedObject> {
    hovered.and_then(|id| state.session.get_mesh(id))
}

/// Aktiviert ein Editor-Werkzeug. Ein laufendes Werkzeug wird abgebrochen.
pub fn set_editor_tool(state: &mut EditorState, tool: EditorTool) -> anyhow::Result<()> {
    let mut previous = std::mem::take(&mut state.editor.active);
    previous.cancel(&state.session)?;
    state.editor.active = ActiveTool::from_kind(tool, &state.tool_settings);
    log::info!("Editor-Werkzeug: {:?}", tool);
    Ok(())
}

/// Reicht einen Klick an das aktive Werkzeug weiter.
pub async fn tool_mouse_down(
    state: &mut EditorState,
    pos: DVec3,
    hovered: Option<ObjectId>,
) -> anyhow::Result<()> {
    let hovered = resolve(state, hovered);
    state
        .editor
        .active
        .on_mouse_down(&state.session, pos, hovered.as_ref())
        .await?;
    Ok(())
}

/// Schließt das aktive Werkzeug ab (Rechtsklick).
pub async fn finish_tool(
    state: &mut EditorState,
    pos: DVec3,
    hovered: Option<ObjectId>,
) -> anyhow::Result<()> {
    let hovered = resolve(state, hovered);
    state
        .editor
        .active
        .finish(&state.session, pos, hovered.as_ref())
        .await?;
    Ok(())
}

/// Mausbewegung: aktualisiert die Werkzeug-Vorschau und die Hover-Markierung.
///
/// Mit Werkzeug wird nur markiert, wenn das Werkzeug sich anbinden kann;
/// ohne Werkzeug jedes bestätigte Objekt.
pub async fn pointer_move(
    state: &mut EditorState,
    pos: DVec3,
    hovered: Option<ObjectId>,
) -> anyhow::Result<()> {
    let target = resolve(state, hovered);
    let highlight = if state.editor.active.is_none() {
        target.as_ref().is_some_and(|obj| !obj.temporary)
    } else {
        state
            .editor
            .active
            .on_mouse_move(&state.session, pos, target.as_ref())
            .await?
    };

    let hovered = target.map(|obj| obj.id);
    if let Some(previous) = state.editor.hovered.filter(|prev| Some(*prev) != hovered) {
        state.session.set_hover(previous, false);
    }
    if let Some(id) = hovered {
        state.session.set_hover(id, highlight);
    }
    state.editor.hovered = hovered;
    Ok(())
}

pub fn set_ctrl(state: &mut EditorState, down: bool) {
    state.editor.ctrl_down = down;
}

pub fn set_shift(state: &mut EditorState, down: bool) {
    state.editor.shift_down = down;
}
