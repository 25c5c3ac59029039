//! Kernel-Anbindung: ein `Transport`-Trait, zwei Implementierungen.
//!
//! - `LocalTransport`: direkte Aufrufe in eine prozessinterne Kernel-Bindung,
//!   Ausgaben werden per `get_updates` abgefragt.
//! - `RemoteTransport`: WebSocket-RPC, Ausgaben kommen als Push-Nachrichten.
//!
//! Die Session kennt nur den Trait und wählt die Implementierung einmalig beim Aufbau.

mod call;
mod local;
mod remote;

pub use call::{Envelope, KernelCall};
pub use local::{Kernel, LocalTransport};
pub use remote::RemoteTransport;

use crate::core::UpdateMsg;
use std::task::{Context, Poll};

/// Betriebsart eines Transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Local,
    Remote,
}

/// Fehler auf Transportebene (Verbindung, Serialisierung, Kernel-Bindung).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("Verbindung zu {endpoint} fehlgeschlagen: {reason}")]
    Connect { endpoint: String, reason: String },
    #[error("Verbindung geschlossen")]
    Closed,
    #[error("Nachricht konnte nicht kodiert werden: {0}")]
    Encode(String),
    #[error("Kernel-Aufruf fehlgeschlagen: {0}")]
    Kernel(String),
}

/// Gemeinsame Schnittstelle für lokale und entfernte Kernel-Aufrufe.
pub trait Transport {
    /// Betriebsart (für Logging und Diagnose).
    fn mode(&self) -> TransportMode;

    /// Sendet einen Aufruf ohne auf ein Ergebnis zu warten.
    fn send(&mut self, call: &KernelCall) -> Result<(), TransportError>;

    /// Liefert den nächsten Stapel Kernel-Nachrichten für `file`.
    ///
    /// `Poll::Pending` registriert den Waker aus `cx`; der Aufrufer wird erneut
    /// geweckt, sobald Nachrichten vorliegen könnten.
    fn poll_updates(
        &mut self,
        file: &str,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Vec<UpdateMsg>, TransportError>>;

    /// Liefert die sofort verfügbaren Nachrichten, ohne zu warten oder einen
    /// Waker zu registrieren. Leerer Stapel: nichts liegt vor.
    fn try_updates(&mut self, file: &str) -> Result<Vec<UpdateMsg>, TransportError> {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        match self.poll_updates(file, &mut cx) {
            Poll::Ready(result) => result,
            Poll::Pending => Ok(Vec::new()),
        }
    }

    /// Schließt die Verbindung. Standard: nichts zu tun.
    fn close(&mut self) {}
}
