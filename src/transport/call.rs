//! Kernel-Aufrufe und ihr Drahtformat `{"func_name": ..., "params": [...]}`.
//!
//! Die Parameterreihenfolge ist positionsgebunden und beginnt stets mit dem Dateinamen.

use crate::core::{KernelObject, ObjectId, Point3d, QueryId, UndoEventId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON-Umschlag eines Remote-Aufrufs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub func_name: String,
    pub params: Vec<Value>,
}

/// Ein einzelner Aufruf an den Kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelCall {
    // ── Datei ──────────────────────────────────────────────
    InitFile {
        file: String,
    },
    OpenFile {
        file: String,
    },
    SaveFile {
        file: String,
    },
    SaveAsFile {
        file: String,
        new_file: String,
    },
    CloseFile {
        file: String,
    },

    // ── Undo ───────────────────────────────────────────────
    BeginUndoEvent {
        file: String,
        event: UndoEventId,
        desc: String,
    },
    EndUndoEvent {
        file: String,
        event: UndoEventId,
    },
    SuspendEvent {
        file: String,
        event: UndoEventId,
    },
    ResumeEvent {
        file: String,
        event: UndoEventId,
    },
    CancelEvent {
        file: String,
        event: UndoEventId,
    },
    UndoLatest {
        file: String,
    },
    RedoLatest {
        file: String,
    },
    TakeUndoSnapshot {
        file: String,
        event: UndoEventId,
        id: ObjectId,
    },

    // ── Mutationen ─────────────────────────────────────────
    AddObject {
        file: String,
        event: UndoEventId,
        object: KernelObject,
    },
    DeleteObject {
        file: String,
        event: UndoEventId,
        id: ObjectId,
    },
    MoveObject {
        file: String,
        event: UndoEventId,
        id: ObjectId,
        delta: Point3d,
    },
    MoveObjects {
        file: String,
        event: UndoEventId,
        ids: Vec<ObjectId>,
        delta: Point3d,
    },
    SetObjectData {
        file: String,
        event: UndoEventId,
        id: ObjectId,
        data: Value,
    },
    SetObjectDatas {
        file: String,
        event: UndoEventId,
        data: Vec<(ObjectId, Value)>,
    },
    JoinAtPoints {
        file: String,
        event: UndoEventId,
        id_1: ObjectId,
        id_2: ObjectId,
        pt: Point3d,
    },
    SnapToPoint {
        file: String,
        event: UndoEventId,
        id: ObjectId,
        snap_to_id: ObjectId,
        pt: Point3d,
    },
    SnapToLine {
        file: String,
        event: UndoEventId,
        id: ObjectId,
        snap_to_id: ObjectId,
        pt: Point3d,
    },
    CopyObjects {
        file: String,
        event: UndoEventId,
        ids: Vec<ObjectId>,
        delta: Point3d,
        user: UserId,
        query: QueryId,
    },

    // ── Abfragen ───────────────────────────────────────────
    CanReferTo {
        file: String,
        id: ObjectId,
        query: QueryId,
    },
    GetClosestPoint {
        file: String,
        id: ObjectId,
        pt: Point3d,
        query: QueryId,
    },
    GetObjectData {
        file: String,
        id: ObjectId,
        prop: String,
        query: QueryId,
    },
}

impl KernelCall {
    /// Funktionsname auf dem Draht.
    pub fn func_name(&self) -> &'static str {
        match self {
            KernelCall::InitFile { .. } => "init_file",
            KernelCall::OpenFile { .. } => "open_file",
            KernelCall::SaveFile { .. } => "save_file",
            KernelCall::SaveAsFile { .. } => "save_as_file",
            KernelCall::CloseFile { .. } => "close_file",
            KernelCall::BeginUndoEvent { .. } => "begin_undo_event",
            KernelCall::EndUndoEvent { .. } => "end_undo_event",
            KernelCall::SuspendEvent { .. } => "suspend_event",
            KernelCall::ResumeEvent { .. } => "resume_event",
            KernelCall::CancelEvent { .. } => "cancel_event",
            KernelCall::UndoLatest { .. } => "undo_latest",
            KernelCall::RedoLatest { .. } => "redo_latest",
            KernelCall::TakeUndoSnapshot { .. } => "take_undo_snapshot",
            KernelCall::AddObject { .. } => "add_object",
            KernelCall::DeleteObject { .. } => "delete_object",
            KernelCall::MoveObject { .. } => "move_object",
            KernelCall::MoveObjects { .. } => "move_objects",
            KernelCall::SetObjectData { .. } => "set_object_data",
            KernelCall::SetObjectDatas { .. } => "set_object_datas",
            KernelCall::JoinAtPoints { .. } => "join_at_points",
            KernelCall::SnapToPoint { .. } => "snap_to_point",
            KernelCall::SnapToLine { .. } => "snap_to_line",
            KernelCall::CopyObjects { .. } => "copy_objects",
            KernelCall::CanReferTo { .. } => "can_refer_to",
            KernelCall::GetClosestPoint { .. } => "get_closest_point",
            KernelCall::GetObjectData { .. } => "get_object_data",
        }
    }

    /// Dateiname, auf den sich der Aufruf bezieht.
    pub fn file(&self) -> &str {
        match self {
            KernelCall::InitFile { file }
            | KernelCall::OpenFile { file }
            | KernelCall::SaveFile { file }
            | KernelCall::SaveAsFile { file, .. }
            | KernelCall::CloseFile { file }
            | KernelCall::BeginUndoEvent { file, .. }
            | KernelCall::EndUndoEvent { file, .. }
            | KernelCall::SuspendEvent { file, .. }
            | KernelCall::ResumeEvent { file, .. }
            | KernelCall::CancelEvent { file, .. }
            | KernelCall::UndoLatest { file }
            | KernelCall::RedoLatest { file }
            | KernelCall::TakeUndoSnapshot { file, .. }
            | KernelCall::AddObject { file, .. }
            | KernelCall::DeleteObject { file, .. }
            | KernelCall::MoveObject { file, .. }
            | KernelCall::MoveObjects { file, .. }
            | KernelCall::SetObjectData { file, .. }
            | KernelCall::SetObjectDatas { file, .. }
            | KernelCall::JoinAtPoints { file, .. }
            | KernelCall::SnapToPoint { file, .. }
            | KernelCall::SnapToLine { file, .. }
            | KernelCall::CopyObjects { file, .. }
            | KernelCall::CanReferTo { file, .. }
            | KernelCall::GetClosestPoint { file, .. }
            | KernelCall::GetObjectData { file, .. } => file,
        }
    }

    /// Undo-Event, zu dem der Aufruf gehört (falls vorhanden).
    pub fn event(&self) -> Option<UndoEventId> {
        match self {
            KernelCall::BeginUndoEvent { event, .. }
            | KernelCall::EndUndoEvent { event, .. }
            | KernelCall::SuspendEvent { event, .. }
            | KernelCall::ResumeEvent { event, .. }
            | KernelCall::CancelEvent { event, .. }
            | KernelCall::TakeUndoSnapshot { event, .. }
            | KernelCall::AddObject { event, .. }
            | KernelCall::DeleteObject { event, .. }
            | KernelCall::MoveObject { event, .. }
            | KernelCall::MoveObjects { event, .. }
            | KernelCall::SetObjectData { event, .. }
            | KernelCall::SetObjectDatas { event, .. }
            | KernelCall::JoinAtPoints { event, .. }
            | KernelCall::SnapToPoint { event, .. }
            | KernelCall::SnapToLine { event, .. }
            | KernelCall::CopyObjects { event, .. } => Some(*event),
            _ => None,
        }
    }

    /// Positionsgebundene Parameter in Drahtreihenfolge.
    pub fn params(&self) -> Vec<Value> {
        match self {
            KernelCall::InitFile { file }
            | KernelCall::OpenFile { file }
            | KernelCall::SaveFile { file }
            | KernelCall::CloseFile { file }
            | KernelCall::UndoLatest { file }
            | KernelCall::RedoLatest { file } => vec![json!(file)],
            KernelCall::SaveAsFile { file, new_file } => vec![json!(file), json!(new_file)],
            KernelCall::BeginUndoEvent { file, event, desc } => {
                vec![json!(file), json!(event), json!(desc)]
            }
            KernelCall::EndUndoEvent { file, event }
            | KernelCall::SuspendEvent { file, event }
            | KernelCall::ResumeEvent { file, event }
            | KernelCall::CancelEvent { file, event } => vec![json!(file), json!(event)],
            KernelCall::TakeUndoSnapshot { file, event, id }
            | KernelCall::DeleteObject { file, event, id } => {
                vec![json!(file), json!(event), json!(id)]
            }
            KernelCall::AddObject {
                file,
                event,
                object,
            } => vec![
                json!(file),
                json!(event),
                json!(object.object_type),
                object.obj.clone(),
            ],
            KernelCall::MoveObject {
                file,
                event,
                id,
                delta,
            } => vec![json!(file), json!(event), json!(id), json!(delta)],
            KernelCall::MoveObjects {
                file,
                event,
                ids,
                delta,
            } => vec![json!(file), json!(event), json!(ids), json!(delta)],
            KernelCall::SetObjectData {
                file,
                event,
                id,
                data,
            } => vec![json!(file), json!(event), json!(id), data.clone()],
            KernelCall::SetObjectDatas { file, event, data } => {
                let pairs: Vec<Value> = data.iter().map(|(id, value)| json!([id, value])).collect();
                vec![json!(file), json!(event), Value::Array(pairs)]
            }
            KernelCall::JoinAtPoints {
                file,
                event,
                id_1,
                id_2,
                pt,
            } => vec![json!(file), json!(event), json!(id_1), json!(id_2), json!(pt)],
            KernelCall::SnapToPoint {
                file,
                event,
                id,
                snap_to_id,
                pt,
            }
            | KernelCall::SnapToLine {
                file,
                event,
                id,
                snap_to_id,
                pt,
            } => vec![
                json!(file),
                json!(event),
                json!(id),
                json!(snap_to_id),
                json!(pt),
            ],
            KernelCall::CopyObjects {
                file,
                event,
                ids,
                delta,
                user,
                query,
            } => vec![
                json!(file),
                json!(event),
                json!(ids),
                json!(delta),
                json!(user),
                json!(query),
            ],
            KernelCall::CanReferTo { file, id, query } => {
                vec![json!(file), json!(id), json!(query)]
            }
            KernelCall::GetClosestPoint {
                file,
                id,
                pt,
                query,
            } => vec![json!(file), json!(id), json!(pt), json!(query)],
            KernelCall::GetObjectData {
                file,
                id,
                prop,
                query,
            } => vec![json!(file), json!(id), json!(prop), json!(query)],
        }
    }

    /// Baut den JSON-Umschlag für den Remote-Modus.
    pub fn to_envelope(&self) -> Envelope {
        Envelope {
            func_name: self.func_name().to_string(),
            params: self.params(),
        }
    }
}
