//! Undo-Event-Klammern für Interaktionen.
//!
//! Jedes begonnene Event wird genau einmal abgeschlossen: `end_undo_event`
//! (übernehmen) oder `cancel_event` (verwerfen).

use super::error::SessionError;
use super::session::Session;
use crate::core::{ObjectId, UndoEventId};

/// Lazily begonnenes Undo-Event einer Werkzeug-Interaktion.
#[derive(Debug)]
pub struct UndoScope {
    desc: &'static str,
    event: Option<UndoEventId>,
}

impl UndoScope {
    pub fn new(desc: &'static str) -> Self {
        Self { desc, event: None }
    }

    /// Offenes Event (falls bereits begonnen).
    pub fn event(&self) -> Option<UndoEventId> {
        self.event
    }

    pub fn is_open(&self) -> bool {
        self.event.is_some()
    }

    /// Beginnt das Event beim ersten Aufruf, danach wird die ID wiederverwendet.
    pub fn ensure_begun(&mut self, session: &Session) -> Result<UndoEventId, SessionError> {
        if let Some(event) = self.event {
            return Ok(event);
        }
        let event = session.begin_undo_event(self.desc)?;
        self.event = Some(event);
        Ok(event)
    }

    /// Schließt ein offenes Event ab. Ohne offenes Event: nichts zu tun.
    pub fn commit(&mut self, session: &Session) -> Result<(), SessionError> {
        match self.event.take() {
            Some(event) => session.end_undo_event(event),
            None => Ok(()),
        }
    }

    /// Verwirft ein offenes Event. Ohne offenes Event: nichts zu tun.
    pub fn cancel(&mut self, session: &Session) -> Result<(), SessionError> {
        match self.event.take() {
            Some(event) => session.cancel_event(event),
            None => Ok(()),
        }
    }
}

/// Undo-Klammer für kontinuierliches Verschieben.
///
/// `start`: begin → Snapshot je Objekt → suspend. Danach beliebig viele
/// `move_objs` unter `event()`. Abschluss über `finish` (resume + end) oder
/// `abort` (resume + cancel); beide verbrauchen die Klammer.
#[derive(Debug)]
pub struct DragUndo {
    event: UndoEventId,
    ids: Vec<ObjectId>,
}

impl DragUndo {
    pub fn start(session: &Session, desc: &str, ids: &[ObjectId]) -> Result<Self, SessionError> {
        let event = session.begin_undo_event(desc)?;
        for id in ids {
            session.take_undo_snapshot(event, *id)?;
        }
        session.suspend_event(event)?;
        Ok(Self {
            event,
            ids: ids.to_vec(),
        })
    }

    pub fn event(&self) -> UndoEventId {
        self.event
    }

    /// Objekte, für die beim Start ein Snapshot genommen wurde.
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    pub fn finish(self, session: &Session) -> Result<(), SessionError> {
        session.resume_event(self.event)?;
        session.end_undo_event(self.event)
    }

    pub fn abort(self, session: &Session) -> Result<(), SessionError> {
        session.resume_event(self.event)?;
        session.cancel_event(self.event)
    }
}
