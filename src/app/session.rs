//! Editier-Session: einziger Zugangspunkt für alle Kernel-Operationen.
//!
//! Die Session bündelt Dateiname, Benutzer, Transport, Pending-Registry und
//! Szene. Mutationen werden ohne Antwort gesendet und liefern einen `Pending`,
//! der aufgelöst wird, sobald die Update-Schleife die passende Kernel-Nachricht
//! verarbeitet hat. Alle Futures laufen auf einem Thread; `drive` kombiniert
//! die eigentliche Arbeit mit der Update-Schleife.

use super::error::SessionError;
use super::pending::{Pending, PendingRegistry};
use crate::core::{DataObject, ObjectId, Point3d, QueryId, UndoEventId, UpdateMsg, UserId};
use crate::render::{Material, RenderedObject, SceneAdapter};
use crate::transport::{
    Kernel, KernelCall, LocalTransport, RemoteTransport, Transport, TransportError, TransportMode,
};
use futures::future::{select, try_join_all, Either, TryJoinAll};
use glam::DVec3;
use serde_json::Value;
use std::cell::RefCell;
use std::future::Future;
use std::pin::{pin, Pin};
use std::rc::Rc;
use std::task::{Context, Poll};

/// Future auf mehrere Objektänderungen (alle-oder-Fehler).
pub type PendingAll = TryJoinAll<Pending<RenderedObject>>;

struct SessionState {
    file: Option<String>,
    /// Wird bei jedem Öffnen/Schließen erhöht; beendet alte Update-Schleifen.
    generation: u64,
    user: UserId,
    transport: Box<dyn Transport>,
    registry: PendingRegistry,
    scene: Box<dyn SceneAdapter>,
    /// Vom Kernel gelöschte Objekte seit dem letzten `take_removed`
    removed: Vec<ObjectId>,
}

impl SessionState {
    fn send(&mut self, build: impl FnOnce(String) -> KernelCall) -> Result<(), SessionError> {
        let file = self.file.clone().ok_or(SessionError::NoOpenFile)?;
        let call = build(file);
        self.transport.send(&call)?;
        Ok(())
    }

    fn switch_file(&mut self, file: Option<String>) {
        self.file = file;
        self.generation += 1;
        let dropped = self.registry.clear();
        if dropped > 0 {
            log::warn!("{} ausstehende Kernel-Ergebnisse verworfen", dropped);
        }
        self.scene.reset();
        self.removed.clear();
    }

    fn dispatch(&mut self, msg: UpdateMsg) {
        match msg {
            UpdateMsg::Error { msg, query_id, key } => {
                log::error!("Kernel-Fehler: {}", msg);
                let err = SessionError::Kernel(msg);
                if let Some(query) = query_id {
                    self.registry.reject_read(&query, err.clone());
                }
                if let Some(key) = key {
                    self.registry.reject_change(&key, err);
                }
            }
            UpdateMsg::Delete { key } => {
                self.scene.delete_mesh(&key);
                self.removed.push(key);
            }
            UpdateMsg::Read { query_id, data } => {
                if !self.registry.resolve_read(&query_id, data) {
                    log::debug!("Lese-Ergebnis ohne Wartenden: {}", query_id);
                }
            }
            msg @ (UpdateMsg::Mesh { .. } | UpdateMsg::Other { .. }) => {
                let Some(id) = self.scene.render_update(&msg, false) else {
                    log::warn!("{}-Nachricht ohne gültige ID verworfen", msg.kind());
                    return;
                };
                if let Some(obj) = self.scene.get_mesh(&id) {
                    self.registry.resolve_change(&id, &obj);
                }
            }
        }
    }
}

/// Handle auf die aktive Session. Klone teilen denselben Zustand.
#[derive(Clone)]
pub struct Session {
    inner: Rc<RefCell<SessionState>>,
}

impl Session {
    /// Erstellt eine Session über einen beliebigen Transport. Noch keine Datei offen.
    pub fn new(transport: Box<dyn Transport>, scene: Box<dyn SceneAdapter>, user: UserId) -> Self {
        log::info!("Session gestartet ({:?}-Modus, Benutzer {})", transport.mode(), user);
        Self {
            inner: Rc::new(RefCell::new(SessionState {
                file: None,
                generation: 0,
                user,
                transport,
                registry: PendingRegistry::new(),
                scene,
                removed: Vec::new(),
            })),
        }
    }

    /// Session mit prozessinterner Kernel-Bindung.
    pub fn local<K: Kernel + 'static>(kernel: K, scene: Box<dyn SceneAdapter>, user: UserId) -> Self {
        Self::new(Box::new(LocalTransport::new(kernel, user)), scene, user)
    }

    /// Session über den Kernel-Server an `endpoint`. Kein Retry bei Fehlern.
    pub fn connect(
        endpoint: &str,
        scene: Box<dyn SceneAdapter>,
        user: UserId,
    ) -> Result<Self, TransportError> {
        let transport = RemoteTransport::connect(endpoint, &user)?;
        Ok(Self::new(Box::new(transport), scene, user))
    }

    pub fn user(&self) -> UserId {
        self.inner.borrow().user
    }

    pub fn file(&self) -> Option<String> {
        self.inner.borrow().file.clone()
    }

    pub fn mode(&self) -> TransportMode {
        self.inner.borrow().transport.mode()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    // ── Datei ──────────────────────────────────────────────

    /// Legt eine neue Datei an, leert Szene und Registry.
    pub fn init_file(&self, file: &str) -> Result<(), SessionError> {
        log::info!("Neue Datei: {}", file);
        self.with_state(|st| {
            st.switch_file(Some(file.to_string()));
            st.send(|file| KernelCall::InitFile { file })
        })
    }

    /// Öffnet eine bestehende Datei, leert Szene und Registry.
    pub fn open_file(&self, file: &str) -> Result<(), SessionError> {
        log::info!("Datei öffnen: {}", file);
        self.with_state(|st| {
            st.switch_file(Some(file.to_string()));
            st.send(|file| KernelCall::OpenFile { file })
        })
    }

    pub fn save_file(&self) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::SaveFile { file }))
    }

    /// Speichert unter neuem Namen; die Session arbeitet danach auf `new_file`.
    pub fn save_as_file(&self, new_file: &str) -> Result<(), SessionError> {
        self.with_state(|st| {
            st.send(|file| KernelCall::SaveAsFile {
                file,
                new_file: new_file.to_string(),
            })?;
            st.file = Some(new_file.to_string());
            Ok(())
        })
    }

    /// Schließt die Datei und beendet die Update-Schleife.
    pub fn close_file(&self) -> Result<(), SessionError> {
        self.with_state(|st| {
            st.send(|file| KernelCall::CloseFile { file })?;
            st.switch_file(None);
            Ok(())
        })
    }

    // ── Undo ───────────────────────────────────────────────

    /// Öffnet ein Undo-Event. Die ID wird lokal erzeugt, es gibt keinen Roundtrip.
    pub fn begin_undo_event(&self, desc: &str) -> Result<UndoEventId, SessionError> {
        let event = UndoEventId::new();
        log::debug!("Undo-Event {} beginnt: {}", event, desc);
        self.with_state(|st| {
            st.send(|file| KernelCall::BeginUndoEvent {
                file,
                event,
                desc: desc.to_string(),
            })
        })?;
        Ok(event)
    }

    pub fn end_undo_event(&self, event: UndoEventId) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::EndUndoEvent { file, event }))
    }

    pub fn cancel_event(&self, event: UndoEventId) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::CancelEvent { file, event }))
    }

    pub fn suspend_event(&self, event: UndoEventId) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::SuspendEvent { file, event }))
    }

    pub fn resume_event(&self, event: UndoEventId) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::ResumeEvent { file, event }))
    }

    pub fn undo_latest(&self) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::UndoLatest { file }))
    }

    pub fn redo_latest(&self) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::RedoLatest { file }))
    }

    pub fn take_undo_snapshot(&self, event: UndoEventId, id: ObjectId) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::TakeUndoSnapshot { file, event, id }))
    }

    // ── Mutationen ─────────────────────────────────────────

    fn change(&self, id: ObjectId, build: impl FnOnce(String) -> KernelCall) -> Pending<RenderedObject> {
        self.with_state(|st| match st.send(build) {
            Ok(()) => st.registry.await_change(id),
            Err(e) => Pending::failed(e),
        })
    }

    fn changes(&self, ids: &[ObjectId], build: impl FnOnce(String) -> KernelCall) -> PendingAll {
        self.with_state(|st| match st.send(build) {
            Ok(()) => st.registry.await_all_changes(ids),
            Err(e) => try_join_all(vec![Pending::failed(e)]),
        })
    }

    fn query<T: 'static>(
        &self,
        build: impl FnOnce(String, QueryId) -> KernelCall,
        mapper: impl FnOnce(Value) -> Result<T, SessionError> + 'static,
    ) -> Pending<T> {
        let query = QueryId::new();
        self.with_state(|st| match st.send(|file| build(file, query)) {
            Ok(()) => st.registry.await_read_with(query, mapper),
            Err(e) => Pending::failed(e),
        })
    }

    /// Rendert die Vorschau sofort und legt das Objekt im Kernel an.
    ///
    /// Der Future wird aufgelöst, sobald die bestätigte Version gerendert ist.
    pub fn create_obj(&self, event: UndoEventId, obj: &dyn DataObject) -> Pending<RenderedObject> {
        let object = obj.kernel_object();
        self.with_state(|st| {
            st.scene.render_update(&obj.temp_repr(), true);
        });
        self.change(obj.id(), |file| KernelCall::AddObject {
            file,
            event,
            object,
        })
    }

    pub fn delete_object(&self, event: UndoEventId, id: ObjectId) -> Result<(), SessionError> {
        self.with_state(|st| st.send(|file| KernelCall::DeleteObject { file, event, id }))
    }

    pub fn move_obj(&self, event: UndoEventId, id: ObjectId, delta: DVec3) -> Pending<RenderedObject> {
        self.change(id, |file| KernelCall::MoveObject {
            file,
            event,
            id,
            delta: delta.into(),
        })
    }

    pub fn move_objs(&self, event: UndoEventId, ids: &[ObjectId], delta: DVec3) -> PendingAll {
        self.changes(ids, |file| KernelCall::MoveObjects {
            file,
            event,
            ids: ids.to_vec(),
            delta: delta.into(),
        })
    }

    pub fn set_object_data(&self, event: UndoEventId, id: ObjectId, data: Value) -> Pending<RenderedObject> {
        self.change(id, |file| KernelCall::SetObjectData {
            file,
            event,
            id,
            data,
        })
    }

    pub fn set_objects_datas(&self, event: UndoEventId, data: Vec<(ObjectId, Value)>) -> PendingAll {
        let ids: Vec<ObjectId> = data.iter().map(|(id, _)| *id).collect();
        self.changes(&ids, |file| KernelCall::SetObjectDatas { file, event, data })
    }

    pub fn snap_to_point(
        &self,
        event: UndoEventId,
        id: ObjectId,
        snap_to_id: ObjectId,
        pt: DVec3,
    ) -> Pending<RenderedObject> {
        self.change(id, |file| KernelCall::SnapToPoint {
            file,
            event,
            id,
            snap_to_id,
            pt: pt.into(),
        })
    }

    pub fn snap_to_line(
        &self,
        event: UndoEventId,
        id: ObjectId,
        snap_to_id: ObjectId,
        pt: DVec3,
    ) -> Pending<RenderedObject> {
        self.change(id, |file| KernelCall::SnapToLine {
            file,
            event,
            id,
            snap_to_id,
            pt: pt.into(),
        })
    }

    /// Verbindet zwei Objekte im Punkt `pt`; wartet auf beide Änderungen.
    pub fn join_at_points(&self, event: UndoEventId, id_1: ObjectId, id_2: ObjectId, pt: DVec3) -> PendingAll {
        self.changes(&[id_1, id_2], |file| KernelCall::JoinAtPoints {
            file,
            event,
            id_1,
            id_2,
            pt: pt.into(),
        })
    }

    /// Kopiert Objekte um `delta` versetzt; liefert die IDs der Kopien.
    pub fn copy_objs(&self, event: UndoEventId, ids: &[ObjectId], delta: DVec3) -> Pending<Vec<ObjectId>> {
        let user = self.user();
        self.query(
            |file, query| KernelCall::CopyObjects {
                file,
                event,
                ids: ids.to_vec(),
                delta: delta.into(),
                user,
                query,
            },
            |data| {
                serde_json::from_value(data).map_err(|e| SessionError::InvalidPayload(e.to_string()))
            },
        )
    }

    // ── Abfragen ───────────────────────────────────────────

    pub fn can_refer_to(&self, id: ObjectId) -> Pending<bool> {
        self.query(
            |file, query| KernelCall::CanReferTo { file, id, query },
            |data| {
                data.as_bool()
                    .ok_or_else(|| SessionError::InvalidPayload(data.to_string()))
            },
        )
    }

    pub fn get_closest_point(&self, id: ObjectId, pt: DVec3) -> Pending<DVec3> {
        self.query(
            |file, query| KernelCall::GetClosestPoint {
                file,
                id,
                pt: pt.into(),
                query,
            },
            |data| {
                serde_json::from_value::<Point3d>(data)
                    .map(DVec3::from)
                    .map_err(|e| SessionError::InvalidPayload(e.to_string()))
            },
        )
    }

    pub fn get_object_data(&self, id: ObjectId, prop: &str) -> Pending<Value> {
        let prop = prop.to_string();
        self.query(
            |file, query| KernelCall::GetObjectData {
                file,
                id,
                prop,
                query,
            },
            Ok,
        )
    }

    // ── Registry ───────────────────────────────────────────

    pub fn await_change(&self, id: ObjectId) -> Pending<RenderedObject> {
        self.with_state(|st| st.registry.await_change(id))
    }

    pub fn await_all_changes(&self, ids: &[ObjectId]) -> PendingAll {
        self.with_state(|st| st.registry.await_all_changes(ids))
    }

    pub fn await_read(&self, query: QueryId) -> Pending<Value> {
        self.with_state(|st| st.registry.await_read(query))
    }

    pub fn await_all_reads(&self, queries: &[QueryId]) -> TryJoinAll<Pending<Value>> {
        self.with_state(|st| st.registry.await_all_reads(queries))
    }

    /// Wie `await_all_changes`, löst aber für bereits bestätigte Objekte sofort auf.
    ///
    /// Nötig, wenn die Mesh-Nachrichten im selben Stapel wie das auslösende
    /// Lese-Ergebnis kamen (z.B. beim Einfügen).
    pub fn await_rendered(&self, ids: &[ObjectId]) -> PendingAll {
        self.with_state(|st| {
            let waiters: Vec<_> = ids
                .iter()
                .map(|id| match st.scene.get_mesh(id) {
                    Some(obj) if !obj.temporary => Pending::ready(obj),
                    _ => st.registry.await_change(*id),
                })
                .collect();
            try_join_all(waiters)
        })
    }

    // ── Szene ──────────────────────────────────────────────

    /// Rendert ein Objekt als Vorschau, ohne es zu persistieren.
    pub fn render_temp_object(&self, obj: &dyn DataObject) {
        self.with_state(|st| {
            st.scene.render_update(&obj.temp_repr(), true);
        });
    }

    /// Entfernt eine Vorschau. Unbekannte IDs werden ignoriert.
    pub fn delete_temp_object(&self, id: ObjectId) {
        self.with_state(|st| st.scene.delete_mesh(&id));
    }

    pub fn get_mesh(&self, id: ObjectId) -> Option<RenderedObject> {
        self.inner.borrow().scene.get_mesh(&id)
    }

    pub fn set_material(&self, id: ObjectId, material: Material) {
        self.with_state(|st| st.scene.set_material(&id, material));
    }

    pub fn set_hover(&self, id: ObjectId, hovered: bool) {
        self.with_state(|st| st.scene.set_hover(&id, hovered));
    }

    /// Lesezugriff auf die Szene.
    pub fn with_scene<R>(&self, f: impl FnOnce(&dyn SceneAdapter) -> R) -> R {
        f(self.inner.borrow().scene.as_ref())
    }

    // ── Update-Schleife ────────────────────────────────────

    /// Verarbeitet einen Stapel Kernel-Nachrichten in Eingangsreihenfolge.
    pub fn handle_updates(&self, updates: Vec<UpdateMsg>) {
        self.with_state(|st| {
            for msg in updates {
                st.dispatch(msg);
            }
        });
    }

    /// Verarbeitet alle bereits vorliegenden Kernel-Nachrichten, ohne zu warten.
    ///
    /// Ergänzt `drive`: Arbeit, die ohne `.await` fertig wird, lässt die
    /// Update-Schleife nie zum Zug kommen. Liefert die Anzahl der Nachrichten.
    pub fn pump(&self) -> usize {
        let mut guard = self.inner.borrow_mut();
        let st = &mut *guard;
        let Some(file) = st.file.clone() else {
            return 0;
        };

        let mut handled = 0;
        loop {
            match st.transport.try_updates(&file) {
                Ok(batch) if batch.is_empty() => break,
                Ok(batch) => {
                    handled += batch.len();
                    for msg in batch {
                        st.dispatch(msg);
                    }
                }
                Err(TransportError::Closed) => {
                    log::error!("Kernel-Verbindung geschlossen");
                    st.registry.clear();
                    break;
                }
                Err(e) => {
                    log::error!("Kernel-Updates fehlgeschlagen: {:#}", e);
                    break;
                }
            }
        }
        handled
    }

    /// Gibt die seit dem letzten Aufruf vom Kernel gelöschten Objekte zurück.
    pub fn take_removed(&self) -> Vec<ObjectId> {
        std::mem::take(&mut self.inner.borrow_mut().removed)
    }

    /// Update-Schleife für die aktuell geöffnete Datei.
    ///
    /// Endet, sobald die Datei geschlossen oder ersetzt wird.
    pub fn update_loop(&self) -> UpdateLoop {
        UpdateLoop {
            state: Rc::clone(&self.inner),
            generation: self.inner.borrow().generation,
        }
    }

    /// Treibt `work` zusammen mit der Update-Schleife voran.
    ///
    /// Endet die Schleife vorher (Datei geschlossen), läuft `work` allein weiter.
    pub async fn drive<F: Future>(&self, work: F) -> F::Output {
        let work = pin!(work);
        match select(work, self.update_loop()).await {
            Either::Left((output, _)) => output,
            Either::Right(((), work)) => work.await,
        }
    }
}

/// Future der Update-Schleife (siehe `Session::update_loop`).
pub struct UpdateLoop {
    state: Rc<RefCell<SessionState>>,
    generation: u64,
}

impl Future for UpdateLoop {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // Kein Wiedereintritt: ist der Zustand gerade geliehen, später erneut versuchen
        let Ok(mut guard) = self.state.try_borrow_mut() else {
            cx.waker().wake_by_ref();
            return Poll::Pending;
        };
        let st = &mut *guard;

        if st.generation != self.generation {
            return Poll::Ready(());
        }
        let Some(file) = st.file.clone() else {
            return Poll::Ready(());
        };

        match st.transport.poll_updates(&file, cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(batch)) => {
                log::debug!("{} Kernel-Nachrichten", batch.len());
                for msg in batch {
                    st.dispatch(msg);
                }
                // Wartende Arbeit zuerst laufen lassen, dann weiter abfragen
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Poll::Ready(Err(TransportError::Closed)) => {
                log::error!("Kernel-Verbindung geschlossen, Update-Schleife endet");
                st.registry.clear();
                Poll::Ready(())
            }
            Poll::Ready(Err(e)) => {
                log::error!("Kernel-Updates fehlgeschlagen: {:#}", e);
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}
