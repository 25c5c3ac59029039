//! Remote-Modus: WebSocket-RPC mit eigenem I/O-Thread.
//!
//! Der Thread besitzt den Socket exklusiv. Ausgehende Aufrufe kommen über einen
//! `std::sync::mpsc`-Kanal, dekodierte Nachrichten gehen über einen
//! `futures`-Kanal zurück und wecken so die Update-Schleife der Session.

use super::{KernelCall, Transport, TransportError, TransportMode};
use crate::core::{UpdateMsg, UserId};
use futures::channel::mpsc as async_mpsc;
use futures::StreamExt;
use std::io;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Error as WsError, Message, WebSocket};

/// Lese-Timeout des Sockets; bestimmt auch die Latenz ausgehender Aufrufe.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;
type Inbound = Result<UpdateMsg, TransportError>;

/// Transport über eine WebSocket-Verbindung zum Kernel-Server.
pub struct RemoteTransport {
    endpoint: String,
    outbound: Option<mpsc::Sender<String>>,
    inbound: async_mpsc::UnboundedReceiver<Inbound>,
    deferred_error: Option<TransportError>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl RemoteTransport {
    /// Baut die Verbindung auf (`<endpoint>?user_id=<user>`).
    ///
    /// Kehrt nach abgeschlossenem Handshake zurück. Kein automatischer Retry.
    pub fn connect(endpoint: &str, user: &UserId) -> Result<Self, TransportError> {
        let url = format!("{}?user_id={}", endpoint, user);
        let connect_err = |reason: String| TransportError::Connect {
            endpoint: endpoint.to_string(),
            reason,
        };

        let (mut socket, _response) =
            tungstenite::connect(url.as_str()).map_err(|e| connect_err(e.to_string()))?;
        if let MaybeTlsStream::Plain(stream) = socket.get_mut() {
            stream
                .set_read_timeout(Some(POLL_INTERVAL))
                .map_err(|e| connect_err(e.to_string()))?;
        }

        let (out_tx, out_rx) = mpsc::channel::<String>();
        let (in_tx, in_rx) = async_mpsc::unbounded::<Inbound>();
        let shutdown = Arc::new(AtomicBool::new(false));
        let worker_shutdown = Arc::clone(&shutdown);

        let worker = thread::Builder::new()
            .name("flx-ws-io".into())
            .spawn(move || run_worker(socket, out_rx, in_tx, worker_shutdown))
            .map_err(|e| connect_err(e.to_string()))?;

        log::info!("Mit Kernel-Server verbunden: {}", endpoint);

        Ok(Self {
            endpoint: endpoint.to_string(),
            outbound: Some(out_tx),
            inbound: in_rx,
            deferred_error: None,
            shutdown,
            worker: Some(worker),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for RemoteTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Remote
    }

    fn send(&mut self, call: &KernelCall) -> Result<(), TransportError> {
        let text = serde_json::to_string(&call.to_envelope())
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        log::debug!("remote → {}", call.func_name());
        let outbound = self.outbound.as_ref().ok_or(TransportError::Closed)?;
        outbound.send(text).map_err(|_| TransportError::Closed)
    }

    fn poll_updates(
        &mut self,
        _file: &str,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Vec<UpdateMsg>, TransportError>> {
        if let Some(err) = self.deferred_error.take() {
            return Poll::Ready(Err(err));
        }

        let mut batch = Vec::new();
        loop {
            match self.inbound.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(msg))) => batch.push(msg),
                Poll::Ready(Some(Err(err))) => {
                    if batch.is_empty() {
                        return Poll::Ready(Err(err));
                    }
                    self.deferred_error = Some(err);
                    break;
                }
                Poll::Ready(None) => {
                    if batch.is_empty() {
                        return Poll::Ready(Err(TransportError::Closed));
                    }
                    self.deferred_error = Some(TransportError::Closed);
                    break;
                }
                Poll::Pending => break,
            }
        }

        if batch.is_empty() {
            Poll::Pending
        } else {
            Poll::Ready(Ok(batch))
        }
    }

    fn close(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.outbound = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("WebSocket-I/O-Thread ist abgestürzt");
            }
            log::info!("Verbindung zu {} geschlossen", self.endpoint);
        }
    }
}

impl Drop for RemoteTransport {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_worker(
    mut socket: Socket,
    outbound: mpsc::Receiver<String>,
    inbound: async_mpsc::UnboundedSender<Inbound>,
    shutdown: Arc<AtomicBool>,
) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            let _ = socket.close(None);
            let _ = socket.flush();
            return;
        }

        loop {
            match outbound.try_recv() {
                Ok(text) => {
                    if let Err(e) = socket.send(Message::text(text)) {
                        log::error!("WebSocket-Senden fehlgeschlagen: {}", e);
                        let _ = inbound.unbounded_send(Err(TransportError::Closed));
                        return;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    let _ = socket.close(None);
                    let _ = socket.flush();
                    return;
                }
            }
        }

        match socket.read() {
            Ok(Message::Text(text)) => match serde_json::from_str::<UpdateMsg>(text.as_str()) {
                Ok(msg) => {
                    if inbound.unbounded_send(Ok(msg)).is_err() {
                        return;
                    }
                }
                Err(e) => log::warn!("Nicht dekodierbare Kernel-Nachricht verworfen: {}", e),
            },
            Ok(Message::Close(_)) => {
                let _ = inbound.unbounded_send(Err(TransportError::Closed));
                return;
            }
            Ok(_) => {}
            Err(WsError::Io(e))
                if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {}
            Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {
                let _ = inbound.unbounded_send(Err(TransportError::Closed));
                return;
            }
            Err(e) => {
                log::error!("WebSocket-Lesen fehlgeschlagen: {}", e);
                let _ = inbound.unbounded_send(Err(TransportError::Closed));
                return;
            }
        }
    }
}
