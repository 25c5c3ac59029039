//! Bemaßungs-Werkzeug: Bemaßungsketten, Punkte rasten auf referenzierbare Objekte.
//!
//! Ob ein Objekt referenziert werden kann, entscheidet der Kernel
//! (`can_refer_to`), nicht der Objekttyp. Jedes Übernehmen erzeugt eine neue
//! Bemaßung mit eigener ID; die Vorschau wird dabei verworfen.

use super::common::ToolSettings;
use super::EditTool;
use crate::app::undo::UndoScope;
use crate::app::{Session, SessionError};
use crate::core::{DataObject, Dimension, ObjectId};
use crate::render::RenderedObject;
use glam::DVec3;

#[cfg(test)]
mod tests;

/// Bemaßungs-Werkzeug
pub struct DimensionTool {
    offset: f64,
    preview: Option<Dimension>,
    /// Objekt, auf das der erste Punkt der Vorschau gerastet ist
    first_ref: Option<ObjectId>,
    undo: UndoScope,
}

/// Fragt den Kernel, ob `hovered` referenziert werden kann.
///
/// Vorschau-Objekte kennt der Kernel nicht, sie werden ohne Anfrage abgelehnt.
async fn referable(
    session: &Session,
    hovered: Option<&RenderedObject>,
) -> Result<Option<ObjectId>, SessionError> {
    let Some(obj) = hovered.filter(|o| !o.temporary) else {
        return Ok(None);
    };
    let ok = session.can_refer_to(obj.id).await?;
    Ok(ok.then_some(obj.id))
}

impl DimensionTool {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            offset: settings.dimension_offset,
            preview: None,
            first_ref: None,
            undo: UndoScope::new("Create Dimension"),
        }
    }

    pub fn preview(&self) -> Option<&Dimension> {
        self.preview.as_ref()
    }

    async fn start_preview(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        let target = referable(session, hovered).await?;
        let first = match target {
            Some(id) => session.get_closest_point(id, pt).await?,
            None => pt,
        };
        let dim = Dimension::new(first, first + DVec3::X, self.offset);
        session.render_temp_object(&dim);
        self.preview = Some(dim);
        self.first_ref = target;
        Ok(())
    }

    /// Ersetzt die Vorschau durch eine neue Bemaßung bis `pt`.
    async fn commit(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        let Some(preview) = self.preview.take() else {
            return Ok(());
        };
        let first_ref = self.first_ref.take();
        session.delete_temp_object(preview.id());
        let target = referable(session, hovered).await?;

        let dim = Dimension::new(preview.first, pt, self.offset);
        let event = self.undo.ensure_begun(session)?;
        let _ = session.create_obj(event, &dim);
        if let Some(id) = first_ref {
            let _ = session.snap_to_point(event, dim.id(), id, dim.first);
        }
        if let Some(id) = target {
            let _ = session.snap_to_point(event, dim.id(), id, pt);
        }
        log::debug!("Bemaßung {} übernommen ({:.3})", dim.id(), dim.distance());
        Ok(())
    }
}

impl EditTool for DimensionTool {
    fn name(&self) -> &str {
        "Bemaßung"
    }

    fn status_text(&self) -> &str {
        if self.preview.is_some() {
            "Nächsten Punkt klicken, Rechtsklick beendet"
        } else {
            "Ersten Punkt klicken"
        }
    }

    async fn on_mouse_down(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        if self.preview.is_some() {
            self.commit(session, pt, hovered).await?;
        }
        self.start_preview(session, pt, hovered).await
    }

    async fn on_mouse_move(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<bool, SessionError> {
        if let Some(dim) = self.preview.as_mut() {
            dim.second = pt;
            session.render_temp_object(dim);
        }
        Ok(referable(session, hovered).await?.is_some())
    }

    async fn finish(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        self.commit(session, pt, hovered).await?;
        self.undo.commit(session)
    }

    fn cancel(&mut self, session: &Session) -> Result<(), SessionError> {
        if let Some(dim) = self.preview.take() {
            session.delete_temp_object(dim.id());
        }
        self.first_ref = None;
        self.undo.cancel(session)
    }

    fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    fn has_open_event(&self) -> bool {
        self.undo.is_open()
    }
}
