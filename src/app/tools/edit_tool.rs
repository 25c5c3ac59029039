//! EditTool-Trait: Schnittstelle für alle Platzierungs-Werkzeuge.

use crate::app::{Session, SessionError};
use crate::render::RenderedObject;
use glam::DVec3;

/// Schnittstelle für Platzierungs-Werkzeuge (Wand, Tür, Bemaßung, Decke).
///
/// Ablauf: `Empty → Previewing → (Previewing …) → Committed/Cancelled`.
/// Ein Werkzeug hält höchstens eine Vorschau und höchstens ein offenes
/// Undo-Event; das Event wird beim ersten Übernehmen begonnen und von
/// `finish` abgeschlossen bzw. von `cancel` verworfen.
#[allow(async_fn_in_trait)]
pub trait EditTool {
    /// Anzeigename
    fn name(&self) -> &str;

    /// Statustext für die Statusleiste
    fn status_text(&self) -> &str;

    /// Klick im Modellraum. Ohne Vorschau wird eine begonnen, sonst übernommen.
    async fn on_mouse_down(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError>;

    /// Mausbewegung: aktualisiert die Vorschau.
    ///
    /// Gibt `true` zurück, wenn `hovered` ein gültiges Anbindungsziel ist.
    async fn on_mouse_move(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<bool, SessionError>;

    /// Übernimmt eine offene Vorschau und schließt das Undo-Event ab.
    async fn finish(
        &mut self,
        session: &Session,
        pt: DVec3,
        hovered: Option<&RenderedObject>,
    ) -> Result<(), SessionError>;

    /// Verwirft das offene Undo-Event und die Vorschau.
    fn cancel(&mut self, session: &Session) -> Result<(), SessionError>;

    /// Gibt es eine Vorschau, die noch nicht übernommen wurde?
    fn has_preview(&self) -> bool;

    /// Ist ein Undo-Event begonnen und noch nicht abgeschlossen?
    fn has_open_event(&self) -> bool;
}
