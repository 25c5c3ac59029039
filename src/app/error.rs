//! Fehlertypen der Editier-Session.

use crate::transport::TransportError;

/// Fehler, mit dem ein wartender Aufrufer abgewiesen wird.
///
/// `Clone`, weil eine Kernel-Meldung mehrere Wartende gleichzeitig trifft.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("keine Datei geöffnet")]
    NoOpenFile,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Kernel meldet Fehler: {0}")]
    Kernel(String),
    /// Wartender wurde verworfen (Datei geschlossen oder neu geöffnet).
    #[error("Vorgang verworfen")]
    Abandoned,
    #[error("unerwartete Antwort: {0}")]
    InvalidPayload(String),
}
