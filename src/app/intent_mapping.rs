//! Mapping von UI-Intents auf mutierende App-Commands.

use super::state::EditorTool;
use super::{AppCommand, AppIntent, EditorState};

#[cfg(test)]
mod tests;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &EditorState, intent: AppIntent) -> Vec<AppCommand> {
    let tool_active = !state.editor.active.is_none();

    match intent {
        AppIntent::NewFileRequested { file } => vec![AppCommand::InitFile {
            file: file.unwrap_or_else(|| state.options.default_filename.clone()),
        }],
        AppIntent::OpenFileRequested { file } => vec![AppCommand::OpenFile { file }],
        AppIntent::SaveRequested => vec![AppCommand::SaveFile],
        AppIntent::SaveAsRequested { file } => vec![AppCommand::SaveFileAs { file }],
        AppIntent::CloseFileRequested => vec![AppCommand::CloseFile],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],
        AppIntent::ToolSelected { tool } => vec![AppCommand::SetEditorTool { tool }],

        AppIntent::ViewportClicked { pos, hovered } => {
            if tool_active {
                vec![AppCommand::ToolMouseDown { pos, hovered }]
            } else if let Some(id) = hovered {
                vec![AppCommand::SelectObject {
                    id,
                    additive: state.editor.ctrl_down,
                }]
            } else {
                vec![AppCommand::ClearSelection]
            }
        }
        AppIntent::ViewportRightClicked { pos, hovered } => {
            if tool_active {
                vec![
                    AppCommand::FinishTool { pos, hovered },
                    AppCommand::SetEditorTool {
                        tool: EditorTool::None,
                    },
                ]
            } else {
                Vec::new()
            }
        }
        AppIntent::PointerMoved { pos, hovered } => vec![AppCommand::PointerMove { pos, hovered }],
        AppIntent::ObjectDragged { id, delta } => {
            // Während einer Werkzeug-Interaktion wird nicht verschoben
            if tool_active {
                Vec::new()
            } else {
                vec![AppCommand::DragSelection { id, delta }]
            }
        }
        AppIntent::ObjectDragEnded => {
            if state.editor.is_dragging() {
                vec![AppCommand::EndDrag]
            } else {
                Vec::new()
            }
        }

        AppIntent::DeleteRequested => vec![AppCommand::DeleteSelected],
        AppIntent::EscapePressed => {
            if state.editor.is_dragging() {
                vec![AppCommand::AbortDrag]
            } else if tool_active {
                vec![AppCommand::SetEditorTool {
                    tool: EditorTool::None,
                }]
            } else {
                vec![AppCommand::ClearSelection]
            }
        }
        AppIntent::CtrlChanged { down } => vec![AppCommand::SetCtrl { down }],
        AppIntent::ShiftChanged { down } => vec![AppCommand::SetShift { down }],
        AppIntent::CopyRequested => vec![AppCommand::CopySelection],
        AppIntent::PasteRequested => vec![AppCommand::PasteClipboard],
        AppIntent::PropertyEdited { prop, value } => {
            vec![AppCommand::SetSelectionProperty { prop, value }]
        }
    }
}
