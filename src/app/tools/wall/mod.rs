//! Wand-Werkzeug: zeichnet Wandketten, aufeinanderfolgende Segmente werden verbunden.
//!
//! Das übernommene Segment behält die ID seiner Vorschau. Liegt der Klick auf
//! einer fremden Wand, wird das Segmentende dort angeschlossen.

use super::common::{ground, ToolSettings};
use super::EditTool;
use crate::app::undo::UndoScope;
use crate::app::{Session, SessionError};
use crate::core::{DataObject, ObjectId, Wall};
use crate::render::RenderedObject;
use glam::DVec3;

#[cfg(test)]
mod tests;

/// Wand-Werkzeug
pub struct WallTool {
    width: f64,
    height: f64,
    preview_offset: DVec3,
    chain_preview_offset: DVec3,
    /// Aktuelle Vorschau (ID wird beim Übernehmen zur Wand-ID)
    preview: Option<Wall>,
    /// Zuletzt übernommenes Segment der Kette
    last_id: Option<ObjectId>,
    undo: UndoScope,
}

impl WallTool {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            width: settings.wall_width,
            height: settings.wall_height,
            preview_offset: settings.preview_offset,
            chain_preview_offset: settings.chain_preview_offset,
            preview: None,
            last_id: None,
            undo: UndoScope::new("Create Wall"),
        }
    }

    pub fn preview(&self) -> Option<&Wall> {
        self.preview.as_ref()
    }

    pub fn last_id(&self) -> Option<ObjectId> {
        self.last_id
    }

    /// Anbindung nur an fremde Wände: nicht an das letzte Segment, nicht an die Vorschau.
    fn can_join(&self, hovered: Option<&RenderedObject>) -> bool {
        let preview_id = self.preview.as_ref().map(|w| w.id());
        hovered.is_some_and(|obj| {
            obj.is_type("Wall") && Some(obj.id) != self.last_id && Some(obj.id) != preview_id
        })
    }

    fn start_preview(&mut self, session: &Session, pt: DVec3, offset: DVec3) {
        let first = ground(pt);
        let wall = Wall::new(first, first + offset, self.width, self.height);
        session.render_temp_object(&wall);
        self.preview = Some(wall);
    }

    /// Übernimmt die Vorschau mit Endpunkt `second`.
    fn commit(
        &mut self,
        session: &Session,
        second: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        let joinable = self.can_join(hovered);
        let Some(mut wall) = self.preview.take() else {
            return Ok(());
        };
        wall.second = ground(second);

        let event = self.undo.ensure_begun(session)?;
        let _ = session.create_obj(event, &wall);
        if let Some(last_id) = self.last_id {
            let _ = session.join_at_points(event, last_id, wall.id(), wall.first);
        }
        if let (true, Some(target)) = (joinable, hovered) {
            let _ = session.join_at_points(event, wall.id(), target.id, wall.second);
        }
        log::debug!("Wand {} übernommen ({:.2} m)", wall.id(), wall.length());
        self.last_id = Some(wall.id());
        Ok(())
    }

    fn reset(&mut self) {
        self.preview = None;
        self.last_id = None;
    }
}

impl EditTool for WallTool {
    fn name(&self) -> &str {
        "Wand"
    }

    fn status_text(&self) -> &str {
        match (&self.preview, self.last_id) {
            (None, _) => "Startpunkt klicken",
            (Some(_), None) => "Endpunkt klicken",
            (Some(_), Some(_)) => "Nächsten Punkt klicken, Rechtsklick beendet die Kette",
        }
    }

    async fn on_mouse_down(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        if self.preview.is_none() {
            self.start_preview(session, pt, self.preview_offset);
            return Ok(());
        }
        self.commit(session, pt, hovered)?;
        self.start_preview(session, pt, self.chain_preview_offset);
        Ok(())
    }

    async fn on_mouse_move(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<bool, SessionError> {
        if let Some(wall) = self.preview.as_mut() {
            wall.second = ground(pt);
            session.render_temp_object(wall);
        }
        Ok(self.can_join(hovered))
    }

    async fn finish(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        self.commit(session, pt, hovered)?;
        self.reset();
        self.undo.commit(session)
    }

    fn cancel(&mut self, session: &Session) -> Result<(), SessionError> {
        if let Some(wall) = self.preview.take() {
            session.delete_temp_object(wall.id());
        }
        self.reset();
        self.undo.cancel(session)
    }

    fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    fn has_open_event(&self) -> bool {
        self.undo.is_open()
    }
}
