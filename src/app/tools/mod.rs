//! Platzierungs-Werkzeuge für Wände, Türen, Bemaßungen und Decken.
//!
//! Jedes Werkzeug implementiert den `EditTool`-Trait. Die Menge der Werkzeuge
//! ist geschlossen; `ActiveTool` hält das aktive Werkzeug samt Zustand und
//! reicht die Zeiger-Ereignisse weiter.

/// Gemeinsame Werkzeug-Parameter und Hilfsfunktionen.
pub mod common;
/// Bemaßungs-Werkzeug (Kette, rastet über Kernel-Abfragen).
pub mod dimension;
/// Tür-Werkzeug (rastet auf Wandachsen).
pub mod door;
/// EditTool-Trait: Schnittstelle für alle Platzierungs-Werkzeuge.
mod edit_tool;
/// Decken-Werkzeug.
pub mod slab;
/// Wand-Werkzeug (Kette mit automatischem Verbinden).
pub mod wall;

pub use common::ToolSettings;
pub use dimension::DimensionTool;
pub use door::DoorTool;
pub use edit_tool::EditTool;
pub use slab::SlabTool;
pub use wall::WallTool;

use super::state::EditorTool;
use super::{Session, SessionError};
use crate::render::RenderedObject;
use glam::DVec3;

/// Aktives Werkzeug mit seinem Interaktionszustand.
#[derive(Default)]
pub enum ActiveTool {
    /// Kein Platzierungs-Werkzeug: Klicks selektieren und verschieben
    #[default]
    None,
    Wall(WallTool),
    Door(DoorTool),
    Dimension(DimensionTool),
    Slab(SlabTool),
}

/// Ruft `$body` mit dem aktiven Werkzeug als `&mut impl EditTool` auf.
macro_rules! with_tool {
    ($self:expr, $tool:ident => $body:expr, none => $none:expr) => {
        match $self {
            ActiveTool::None => $none,
            ActiveTool::Wall($tool) => $body,
            ActiveTool::Door($tool) => $body,
            ActiveTool::Dimension($tool) => $body,
            ActiveTool::Slab($tool) => $body,
        }
    };
}

impl ActiveTool {
    /// Erzeugt ein frisches Werkzeug der gewünschten Art.
    pub fn from_kind(kind: EditorTool, settings: &ToolSettings) -> Self {
        match kind {
            EditorTool::None => Self::None,
            EditorTool::Wall => Self::Wall(WallTool::new(settings)),
            EditorTool::Door => Self::Door(DoorTool::new(settings)),
            EditorTool::Dimension => Self::Dimension(DimensionTool::new(settings)),
            EditorTool::Slab => Self::Slab(SlabTool::new(settings)),
        }
    }

    pub fn kind(&self) -> EditorTool {
        match self {
            Self::None => EditorTool::None,
            Self::Wall(_) => EditorTool::Wall,
            Self::Door(_) => EditorTool::Door,
            Self::Dimension(_) => EditorTool::Dimension,
            Self::Slab(_) => EditorTool::Slab,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn name(&self) -> &str {
        with_tool!(self, t => t.name(), none => "Auswahl")
    }

    pub fn status_text(&self) -> &str {
        with_tool!(self, t => t.status_text(), none => "Objekt anklicken")
    }

    pub fn has_preview(&self) -> bool {
        with_tool!(self, t => t.has_preview(), none => false)
    }

    pub fn has_open_event(&self) -> bool {
        with_tool!(self, t => t.has_open_event(), none => false)
    }

    pub async fn on_mouse_down(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        with_tool!(self, t => t.on_mouse_down(session, pt, hovered).await, none => Ok(()))
    }

    pub async fn on_mouse_move(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<bool, SessionError> {
        with_tool!(self, t => t.on_mouse_move(session, pt, hovered).await, none => Ok(false))
    }

    pub async fn finish(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError> {
        with_tool!(self, t => t.finish(session, pt, hovered).await, none => Ok(()))
    }

    pub fn cancel(&mut self, session: &Session) -> Result<(), SessionError> {
        with_tool!(self, t => t.cancel(session), none => Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::fake_session;
    use futures::executor::block_on;

    #[test]
    fn test_from_kind_round_trips_kind() {
        let settings = ToolSettings::default();
        for kind in [
            EditorTool::None,
            EditorTool::Wall,
            EditorTool::Door,
            EditorTool::Dimension,
            EditorTool::Slab,
        ] {
            assert_eq!(ActiveTool::from_kind(kind, &settings).kind(), kind);
        }
    }

    #[test]
    fn test_none_tool_ignores_pointer_events() {
        let (session, kernel) = fake_session();
        let mut tool = ActiveTool::default();

        block_on(tool.on_mouse_down(&session, DVec3::ZERO, None)).expect("Klick");
        block_on(tool.finish(&session, DVec3::ZERO, None)).expect("finish");
        tool.cancel(&session).expect("cancel");

        assert!(!tool.has_preview());
        assert!(kernel.borrow().calls.is_empty());
    }

    #[test]
    fn test_dispatch_reaches_wall_tool() {
        let (session, _kernel) = fake_session();
        let mut tool = ActiveTool::from_kind(EditorTool::Wall, &ToolSettings::default());

        block_on(tool.on_mouse_down(&session, DVec3::ZERO, None)).expect("Klick");
        assert!(tool.has_preview());
        assert_eq!(tool.name(), "Wand");
    }
}
