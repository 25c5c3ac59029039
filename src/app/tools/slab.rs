//! Decken-Werkzeug: rechteckige Platten über zwei diagonale Ecken.

use super::common::{ground, ToolSettings};
use super::EditTool;
use crate::app::undo::UndoScope;
use crate::app::{Session, SessionError};
use crate::core::{DataObject, Slab};
use crate::render::RenderedObject;
use glam::DVec3;

/// Decken-Werkzeug. Platten werden nie an andere Objekte angebunden.
pub struct SlabTool {
    thickness: f64,
    preview_offset: DVec3,
    preview: Option<Slab>,
    undo: UndoScope,
}

impl SlabTool {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            thickness: settings.slab_thickness,
            preview_offset: settings.preview_offset,
            preview: None,
            undo: UndoScope::new("Create Slab"),
        }
    }

    pub fn preview(&self) -> Option<&Slab> {
        self.preview.as_ref()
    }

    fn start_preview(&mut self, session: &Session, pt: DVec3) {
        let corner = ground(pt);
        let slab = Slab::new(corner, corner + self.preview_offset, self.thickness);
        session.render_temp_object(&slab);
        self.preview = Some(slab);
    }

    fn commit(&mut self, session: &Session, pt: DVec3) -> Result<(), SessionError> {
        let Some(preview) = self.preview.take() else {
            return Ok(());
        };
        session.delete_temp_object(preview.id());
        let slab = Slab::new(preview.corner_a, ground(pt), self.thickness);
        let event = self.undo.ensure_begun(session)?;
        let _ = session.create_obj(event, &slab);
        log::debug!("Decke {} übernommen", slab.id());
        Ok(())
    }
}

impl EditTool for SlabTool {
    fn name(&self) -> &str {
        "Decke"
    }

    fn status_text(&self) -> &str {
        if self.preview.is_some() {
            "Gegenüberliegende Ecke klicken"
        } else {
            "Erste Ecke klicken"
        }
    }

    async fn on_mouse_down(
        &mut self,
        session: &Session,
        pt: DVec3,
        _hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        self.commit(session, pt)?;
        self.start_preview(session, pt);
        Ok(())
    }

    async fn on_mouse_move(
        &mut self,
        session: &Session,
        pt: DVec3,
        _hovered: Option<&RenderedObject>,
    ) -> Result<bool, SessionError> {
        if let Some(slab) = self.preview.as_mut() {
            slab.corner_b = ground(pt);
            session.render_temp_object(slab);
        }
        Ok(false)
    }

    async fn finish(
        &mut self,
        session: &Session,
        pt: DVec3,
        _hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        self.commit(session, pt)?;
        self.undo.commit(session)
    }

    fn cancel(&mut self, session: &Session) -> Result<(), SessionError> {
        if let Some(slab) = self.preview.take() {
            session.delete_temp_object(slab.id());
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
