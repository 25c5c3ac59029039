use crate::app::state::EditorTool;
use crate::app::test_support::fake_session;
use crate::app::tools::{ActiveTool, ToolSettings};
use crate::app::{AppCommand, AppIntent, EditorState};
use crate::core::ObjectId;
use crate::shared::EditorOptions;
use glam::DVec3;

use super::map_intent_to_commands;

fn state() -> EditorState {
    let (session, _kernel) = fake_session();
    EditorState::new(session, EditorOptions::default())
}

fn with_tool(state: &mut EditorState, tool: EditorTool) {
    state.editor.active = ActiveTool::from_kind(tool, &ToolSettings::default());
}

#[test]
fn test_new_file_without_name_uses_default_filename() {
    let state = state();

    let commands = map_intent_to_commands(&state, AppIntent::NewFileRequested { file: None });

    assert_eq!(
        commands,
        vec![AppCommand::InitFile {
            file: "defaultNew.flx".to_string()
        }]
    );
}

#[test]
fn test_click_without_tool_selects_hovered_object() {
    let mut state = state();
    let id = ObjectId::new();
    state.editor.ctrl_down = true;

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ViewportClicked {
            pos: DVec3::ZERO,
            hovered: Some(id),
        },
    );

    assert_eq!(commands, vec![AppCommand::SelectObject { id, additive: true }]);
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let state = state();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ViewportClicked {
            pos: DVec3::ZERO,
            hovered: None,
        },
    );

    assert_eq!(commands, vec![AppCommand::ClearSelection]);
}

#[test]
fn test_click_with_tool_goes_to_tool() {
    let mut state = state();
    with_tool(&mut state, EditorTool::Wall);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ViewportClicked {
            pos: DVec3::X,
            hovered: None,
        },
    );

    assert!(matches!(commands[0], AppCommand::ToolMouseDown { .. }));
}

#[test]
fn test_right_click_finishes_and_deactivates_tool_in_order() {
    let mut state = state();
    with_tool(&mut state, EditorTool::Dimension);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ViewportRightClicked {
            pos: DVec3::ZERO,
            hovered: None,
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::FinishTool { .. }));
    assert_eq!(
        commands[1],
        AppCommand::SetEditorTool {
            tool: EditorTool::None
        }
    );
}

#[test]
fn test_escape_cascade() {
    let mut state = state();
    assert_eq!(
        map_intent_to_commands(&state, AppIntent::EscapePressed),
        vec![AppCommand::ClearSelection]
    );

    with_tool(&mut state, EditorTool::Door);
    assert_eq!(
        map_intent_to_commands(&state, AppIntent::EscapePressed),
        vec![AppCommand::SetEditorTool {
            tool: EditorTool::None
        }]
    );
}

#[test]
fn test_drag_is_ignored_while_tool_active() {
    let mut state = state();
    with_tool(&mut state, EditorTool::Slab);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ObjectDragged {
            id: ObjectId::new(),
            delta: DVec3::X,
        },
    );

    assert!(commands.is_empty());
}
