use flx_editor::core::MeshData;
use flx_editor::transport::Envelope;
use flx_editor::{ObjectId, SceneGraph, Session, SessionError, TransportMode, UpdateMsg, UserId};
use serde_json::json;
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::Message;

/// Kernel-Server für genau einen Client: nimmt den ersten Aufruf entgegen,
/// antwortet mit `reply` und wartet dann auf das Schließen der Verbindung.
fn serve_once(reply: UpdateMsg) -> (SocketAddr, JoinHandle<(String, Envelope)>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Port binden");
    let addr = listener.local_addr().expect("Adresse");

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Verbindung annehmen");
        let mut uri = String::new();
        let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            uri = req.uri().to_string();
            Ok(resp)
        };
        let mut socket = tungstenite::accept_hdr(stream, callback)
            .unwrap_or_else(|e| panic!("WebSocket-Handshake fehlgeschlagen: {e}"));

        let first = socket.read().expect("Erster Aufruf");
        let envelope: Envelope =
            serde_json::from_str(first.to_text().expect("Textnachricht")).expect("Umschlag");

        let text = serde_json::to_string(&reply).expect("Antwort kodieren");
        socket.send(Message::text(text)).expect("Antwort senden");

        loop {
            match socket.read() {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
        (uri, envelope)
    });

    (addr, server)
}

#[test]
fn test_remote_session_sends_envelope_and_dispatches_push() {
    let id = ObjectId::new();
    let (addr, server) = serve_once(UpdateMsg::Mesh {
        data: MeshData::empty(id),
    });

    let user = UserId::new();
    let session = Session::connect(
        &format!("ws://{}/ws", addr),
        Box::new(SceneGraph::new()),
        user,
    )
    .expect("Verbindung zum Test-Server");
    assert_eq!(session.mode(), TransportMode::Remote);

    session.init_file("remote.flx").expect("Datei anlegen");
    let rendered = futures::executor::block_on(session.drive(session.await_change(id)))
        .expect("Mesh sollte eintreffen");
    assert_eq!(rendered.id, id);
    assert!(session.get_mesh(id).is_some());

    drop(session);
    let (uri, envelope) = server.join().expect("Server-Thread");
    assert_eq!(uri, format!("/ws?user_id={}", user));
    assert_eq!(envelope.func_name, "init_file");
    assert_eq!(envelope.params, vec![json!("remote.flx")]);
}

#[test]
fn test_correlated_kernel_error_rejects_waiting_change() {
    let id = ObjectId::new();
    let (addr, server) = serve_once(UpdateMsg::Error {
        msg: "Objekt gesperrt".to_string(),
        query_id: None,
        key: Some(id),
    });

    let session = Session::connect(
        &format!("ws://{}/ws", addr),
        Box::new(SceneGraph::new()),
        UserId::new(),
    )
    .expect("Verbindung zum Test-Server");
    session.init_file("remote.flx").expect("Datei anlegen");

    let result = futures::executor::block_on(session.drive(session.await_change(id)));
    match result {
        Err(SessionError::Kernel(msg)) => assert!(msg.contains("gesperrt")),
        other => panic!("Unerwartetes Ergebnis: {other:?}"),
    }

    drop(session);
    server.join().expect("Server-Thread");
}
