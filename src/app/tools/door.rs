//! Tür-Werkzeug: setzt einzelne Türen, bevorzugt in bestehende Wände.

use super::common::{ground, is_wall, wall_line, ToolSettings};
use super::EditTool;
use crate::app::undo::UndoScope;
use crate::app::{Session, SessionError};
use crate::core::geometry::project_on_segment;
use crate::core::{DataObject, Door};
use crate::render::RenderedObject;
use glam::DVec3;

/// Tür-Werkzeug
pub struct DoorTool {
    width: f64,
    height: f64,
    length: f64,
    preview: Option<Door>,
    undo: UndoScope,
}

impl DoorTool {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            width: settings.door_width,
            height: settings.door_height,
            length: settings.door_length,
            preview: None,
            undo: UndoScope::new("Create Door"),
        }
    }

    pub fn preview(&self) -> Option<&Door> {
        self.preview.as_ref()
    }

    /// Übernimmt die Vorschau unter ihrer ID; auf einer Wand wird sie an deren Achse gerastet.
    fn commit(&mut self, session: &Session, hovered: Option<&RenderedObject>) -> Result<(), SessionError> {
        let Some(door) = self.preview.take() else {
            return Ok(());
        };
        let event = self.undo.ensure_begun(session)?;
        let _ = session.create_obj(event, &door);
        if let (true, Some(wall)) = (is_wall(hovered), hovered) {
            let _ = session.snap_to_line(event, door.id(), wall.id, door.first);
        }
        log::debug!("Tür {} übernommen", door.id());
        Ok(())
    }
}

impl EditTool for DoorTool {
    fn name(&self) -> &str {
        "Tür"
    }

    fn status_text(&self) -> &str {
        if self.preview.is_some() {
            "Richtung wählen und klicken"
        } else {
            "Türposition klicken"
        }
    }

    async fn on_mouse_down(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        if self.preview.is_some() {
            return self.commit(session, hovered);
        }
        let door = Door::new(ground(pt), DVec3::X, self.width, self.height, self.length);
        session.render_temp_object(&door);
        self.preview = Some(door);
        Ok(())
    }

    async fn on_mouse_move(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<bool, SessionError> {
        let attachable = is_wall(hovered);
        let Some(door) = self.preview.as_mut() else {
            return Ok(attachable);
        };
        let target = match hovered.filter(|_| attachable).and_then(wall_line) {
            Some((a, b)) => project_on_segment(a, b, ground(pt)),
            None => ground(pt),
        };
        door.set_dir(target - door.first);
        session.render_temp_object(door);
        Ok(attachable)
    }

    async fn finish(
        &mut self,
        session: &Session,
        _pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        self.commit(session, hovered)?;
        self.undo.commit(session)
    }

    fn cancel(&mut self, session: &Session) -> Result<(), SessionError> {
        if let Some(door) = self.preview.take() {
            session.delete_temp_object(door.id());
        }
        self.undo.cancel(session)
    }

    fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    fn has_open_event(&self) -> bool {
        self.undo.is_open()
    }
}
