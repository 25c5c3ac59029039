//! Gemeinsame Helfer für Integrationstests: ein aufzeichnender Kernel im lokalen Modus.

#![allow(dead_code)]

use flx_editor::core::MeshData;
use flx_editor::{
    EditorController, EditorOptions, EditorState, Kernel, KernelCall, ObjectId, SceneGraph,
    Session, UpdateMsg, UserId,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Gemeinsamer Zustand des Test-Kernels.
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<KernelCall>,
    pub queue: Vec<UpdateMsg>,
    /// Antwort auf `can_refer_to`
    pub referable: bool,
    objects: HashMap<ObjectId, Value>,
    /// Angelegte Objekte in Reihenfolge; `undo_latest` nimmt das letzte zurück
    created: Vec<ObjectId>,
}

impl Recorder {
    /// Funktionsnamen aller Aufrufe in Sendereihenfolge.
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.iter().map(KernelCall::func_name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.func_name() == name).count()
    }

    fn emit_mesh(&mut self, id: ObjectId) {
        let metadata = self.objects.get(&id).cloned();
        self.queue.push(UpdateMsg::Mesh {
            data: MeshData {
                id,
                positions: vec![0.0; 9],
                indices: vec![0, 1, 2],
                metadata,
            },
        });
    }
}

/// Kernel-Bindung, die jeden Aufruf aufzeichnet und Meshes zurückmeldet.
pub struct RecordingKernel {
    state: Rc<RefCell<Recorder>>,
}

impl Kernel for RecordingKernel {
    fn call(&mut self, _user: &UserId, call: &KernelCall) -> anyhow::Result<()> {
        let mut rec = self.state.borrow_mut();
        rec.calls.push(call.clone());
        match call {
            KernelCall::AddObject { object, .. } => {
                let id: ObjectId = serde_json::from_value(object.obj["id"].clone())?;
                rec.objects
                    .insert(id, json!({ "type": object.object_type, "Height": 5.0 }));
                rec.created.push(id);
                rec.emit_mesh(id);
            }
            KernelCall::JoinAtPoints { id_1, id_2, .. } => {
                rec.emit_mesh(*id_1);
                rec.emit_mesh(*id_2);
            }
            KernelCall::SnapToPoint { id, .. }
            | KernelCall::SnapToLine { id, .. }
            | KernelCall::MoveObject { id, .. } => rec.emit_mesh(*id),
            KernelCall::SetObjectData { id, data, .. } => {
                if let (Some(meta), Some(fields)) = (rec.objects.get_mut(id), data.as_object()) {
                    for (key, value) in fields {
                        meta[key.as_str()] = value.clone();
                    }
                }
                rec.emit_mesh(*id);
            }
            KernelCall::SetObjectDatas { data, .. } => {
                for (id, _) in data {
                    rec.emit_mesh(*id);
                }
            }
            KernelCall::MoveObjects { ids, .. } => {
                for id in ids {
                    rec.emit_mesh(*id);
                }
            }
            KernelCall::DeleteObject { id, .. } => {
                rec.objects.remove(id);
                rec.queue.push(UpdateMsg::Delete { key: *id });
            }
            KernelCall::UndoLatest { .. } => {
                if let Some(id) = rec.created.pop() {
                    rec.objects.remove(&id);
                    rec.queue.push(UpdateMsg::Delete { key: id });
                }
            }
            KernelCall::CanReferTo { query, .. } => {
                let data = json!(rec.referable);
                rec.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data,
                });
            }
            KernelCall::GetClosestPoint { query, .. } => {
                // Fester Fußpunkt, damit Tests das Einrasten erkennen
                rec.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data: json!({ "x": 7.0, "y": 0.0, "z": 0.0 }),
                });
            }
            KernelCall::GetObjectData { id, prop, query, .. } => {
                let data = rec
                    .objects
                    .get(id)
                    .map(|meta| meta[prop.as_str()].clone())
                    .unwrap_or(Value::Null);
                rec.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data,
                });
            }
            KernelCall::CopyObjects { ids, query, .. } => {
                let copies: Vec<ObjectId> = ids.iter().map(|_| ObjectId::new()).collect();
                for (source, copy) in ids.iter().zip(&copies) {
                    let meta = rec.objects.get(source).cloned().unwrap_or(Value::Null);
                    rec.objects.insert(*copy, meta);
                }
                rec.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data: json!(copies),
                });
                for copy in copies {
                    rec.emit_mesh(copy);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn get_updates(&mut self, _file: &str) -> anyhow::Result<Vec<UpdateMsg>> {
        Ok(std::mem::take(&mut self.state.borrow_mut().queue))
    }
}

/// Editor mit lokaler Session, aufzeichnendem Kernel und neuer Datei.
pub fn make_editor() -> (EditorController, EditorState, Rc<RefCell<Recorder>>) {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let kernel = RecordingKernel {
        state: Rc::clone(&recorder),
    };
    let session = Session::local(kernel, Box::new(SceneGraph::new()), UserId::new());
    let mut state = EditorState::new(session, EditorOptions::default());
    let mut controller = EditorController::new();

    controller
        .handle_intent_blocking(
            &mut state,
            flx_editor::AppIntent::NewFileRequested {
                file: Some("test.flx".to_string()),
            },
        )
        .expect("Neue Datei sollte angelegt werden");
    recorder.borrow_mut().calls.clear();

    (controller, state, recorder)
}
