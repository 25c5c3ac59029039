//! Editor Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, EditorState};

/// Orchestriert UI-Events und Feature-Handler auf dem EditorState.
#[derive(Default)]
pub struct EditorController;

impl EditorController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Der Future muss zusammen mit der Update-Schleife laufen (siehe
    /// `Session::drive`), sonst warten Abfragen und Einfügen ewig.
    pub async fn handle_intent(
        &mut self,
        state: &mut EditorState,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        super::handlers::selection::forget_removed(state);
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command).await?;
        }

        Ok(())
    }

    /// Wie `handle_intent`, blockiert aber bis zum Abschluss und treibt dabei
    /// die Update-Schleife der Session. Danach liegende Kernel-Ausgaben werden
    /// sofort übernommen.
    pub fn handle_intent_blocking(
        &mut self,
        state: &mut EditorState,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let session = state.session.clone();
        let result = futures::executor::block_on(session.drive(self.handle_intent(state, intent)));
        self.apply_updates(state);
        result
    }

    /// Übernimmt alle vorliegenden Kernel-Nachrichten in Szene und Selektion.
    pub fn apply_updates(&mut self, state: &mut EditorState) -> usize {
        let handled = state.session.pump();
        super::handlers::selection::forget_removed(state);
        handled
    }

    fn map_intent_to_commands(&self, state: &EditorState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem EditorState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub async fn handle_command(
        &mut self,
        state: &mut EditorState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei ===
            AppCommand::InitFile { file } => handlers::file_io::init(state, file)?,
            AppCommand::OpenFile { file } => handlers::file_io::open(state, file)?,
            AppCommand::SaveFile => handlers::file_io::save(state)?,
            AppCommand::SaveFileAs { file } => handlers::file_io::save_as(state, file)?,
            AppCommand::CloseFile => handlers::file_io::close(state)?,
            AppCommand::RequestExit => state.should_exit = true,

            // === History ===
            AppCommand::Undo => handlers::history::undo(state)?,
            AppCommand::Redo => handlers::history::redo(state)?,

            // === Werkzeuge ===
            AppCommand::SetEditorTool { tool } => handlers::editing::set_editor_tool(state, tool)?,
            AppCommand::ToolMouseDown { pos, hovered } => {
                handlers::editing::tool_mouse_down(state, pos, hovered).await?
            }
            AppCommand::FinishTool { pos, hovered } => {
                handlers::editing::finish_tool(state, pos, hovered).await?
            }
            AppCommand::PointerMove { pos, hovered } => {
                handlers::editing::pointer_move(state, pos, hovered).await?
            }
            AppCommand::SetCtrl { down } => handlers::editing::set_ctrl(state, down),
            AppCommand::SetShift { down } => handlers::editing::set_shift(state, down),

            // === Selektion ===
            AppCommand::SelectObject { id, additive } => {
                handlers::selection::select_object(state, id, additive)
            }
            AppCommand::ClearSelection => handlers::selection::clear(state),
            AppCommand::DeleteSelected => handlers::selection::delete_selected(state)?,
            AppCommand::DragSelection { id, delta } => {
                handlers::selection::drag(state, id, delta)?
            }
            AppCommand::EndDrag => handlers::selection::end_drag(state)?,
            AppCommand::AbortDrag => handlers::selection::abort_drag(state)?,

            // === Zwischenablage & Eigenschaften ===
            AppCommand::CopySelection => handlers::clipboard::copy(state),
            AppCommand::PasteClipboard => handlers::clipboard::paste(state).await?,
            AppCommand::SetSelectionProperty { prop, value } => {
                handlers::properties::set_property(state, &prop, value)?
            }
        }

        Ok(())
    }
}
