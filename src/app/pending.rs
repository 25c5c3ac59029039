//! Korrelationstabelle für ausstehende Kernel-Ergebnisse.
//!
//! Mutationen werden ohne Antwort gesendet. Wer auf das Ergebnis warten will,
//! registriert sich hier unter der Objekt-ID (Änderungen) bzw. der Query-ID
//! (Lese-Ergebnisse). Die Update-Schleife der Session löst die Einträge auf.

use super::error::SessionError;
use crate::core::{ObjectId, QueryId};
use crate::render::RenderedObject;
use futures::channel::oneshot;
use futures::future::{try_join_all, TryJoinAll};
use futures::FutureExt;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

type ChangeSender = oneshot::Sender<Result<RenderedObject, SessionError>>;
type ReadCallback = Box<dyn FnOnce(Result<Value, SessionError>)>;

/// Future auf ein einzelnes Kernel-Ergebnis.
///
/// Wird der Eintrag verworfen (z.B. neue Datei), endet der Future mit
/// `SessionError::Abandoned`. Ohne passende Nachricht bleibt er offen.
#[must_use = "Pending tut nichts, solange er nicht abgewartet wird"]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, SessionError>>,
}

impl<T> Pending<T> {
    fn channel() -> (oneshot::Sender<Result<T, SessionError>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// Bereits aufgelöster Future.
    pub fn ready(value: T) -> Self {
        Self::settled(Ok(value))
    }

    /// Bereits abgewiesener Future.
    pub fn failed(err: SessionError) -> Self {
        Self::settled(Err(err))
    }

    fn settled(result: Result<T, SessionError>) -> Self {
        let (tx, pending) = Self::channel();
        let _ = tx.send(result);
        pending
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, SessionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.rx.poll_unpin(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(SessionError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Registry für ausstehende Änderungen und Lese-Anfragen.
#[derive(Default)]
pub struct PendingRegistry {
    changes: HashMap<ObjectId, Vec<ChangeSender>>,
    reads: HashMap<QueryId, ReadCallback>,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wartet auf die nächste `Mesh`/`Other`-Nachricht für `id`.
    ///
    /// Mehrere Wartende pro ID sind erlaubt; alle werden von derselben
    /// Nachricht aufgelöst.
    pub fn await_change(&mut self, id: ObjectId) -> Pending<RenderedObject> {
        let (tx, pending) = Pending::channel();
        self.changes.entry(id).or_default().push(tx);
        pending
    }

    /// Wartet auf Änderungen aller `ids`. Scheitert, sobald einer scheitert.
    pub fn await_all_changes(&mut self, ids: &[ObjectId]) -> TryJoinAll<Pending<RenderedObject>> {
        let waiters: Vec<_> = ids.iter().map(|id| self.await_change(*id)).collect();
        try_join_all(waiters)
    }

    /// Wartet auf das Roh-Ergebnis der Anfrage `query`.
    pub fn await_read(&mut self, query: QueryId) -> Pending<Value> {
        self.await_read_with(query, Ok)
    }

    /// Wie `await_read`, wendet aber `mapper` auf das Roh-Ergebnis an.
    pub fn await_read_with<T, F>(&mut self, query: QueryId, mapper: F) -> Pending<T>
    where
        T: 'static,
        F: FnOnce(Value) -> Result<T, SessionError> + 'static,
    {
        let (tx, pending) = Pending::channel();
        let callback: ReadCallback = Box::new(move |result| {
            let _ = tx.send(result.and_then(mapper));
        });
        if self.reads.insert(query, callback).is_some() {
            log::warn!("Query {} doppelt registriert, alter Wartender verworfen", query);
        }
        pending
    }

    /// Wartet auf die Ergebnisse aller `queries`.
    pub fn await_all_reads(&mut self, queries: &[QueryId]) -> TryJoinAll<Pending<Value>> {
        let waiters: Vec<_> = queries.iter().map(|q| self.await_read(*q)).collect();
        try_join_all(waiters)
    }

    /// Löst alle Wartenden für `id` auf und entfernt den Eintrag.
    ///
    /// Gibt die Anzahl der aufgelösten Wartenden zurück.
    pub fn resolve_change(&mut self, id: &ObjectId, obj: &RenderedObject) -> usize {
        let Some(waiters) = self.changes.remove(id) else {
            return 0;
        };
        let count = waiters.len();
        for tx in waiters {
            // Empfänger evtl. schon gedroppt: kein Fehler
            let _ = tx.send(Ok(obj.clone()));
        }
        count
    }

    /// Weist alle Wartenden für `id` mit `err` ab.
    pub fn reject_change(&mut self, id: &ObjectId, err: SessionError) -> usize {
        let Some(waiters) = self.changes.remove(id) else {
            return 0;
        };
        let count = waiters.len();
        for tx in waiters {
            let _ = tx.send(Err(err.clone()));
        }
        count
    }

    /// Löst die Lese-Anfrage `query` auf. `false`, wenn niemand wartet.
    pub fn resolve_read(&mut self, query: &QueryId, data: Value) -> bool {
        match self.reads.remove(query) {
            Some(callback) => {
                callback(Ok(data));
                true
            }
            None => false,
        }
    }

    pub fn reject_read(&mut self, query: &QueryId, err: SessionError) -> bool {
        match self.reads.remove(query) {
            Some(callback) => {
                callback(Err(err));
                true
            }
            None => false,
        }
    }

    /// Verwirft alle Einträge; deren Futures enden mit `Abandoned`.
    pub fn clear(&mut self) -> usize {
        let dropped = self.changes.values().map(Vec::len).sum::<usize>() + self.reads.len();
        self.changes.clear();
        self.reads.clear();
        dropped
    }

    /// Anzahl Wartender für eine Objekt-ID.
    pub fn pending_changes(&self, id: &ObjectId) -> usize {
        self.changes.get(id).map_or(0, Vec::len)
    }

    pub fn pending_reads(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.reads.is_empty()
    }
}
