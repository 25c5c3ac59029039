//! Test-Kernel für Unit-Tests: zeichnet Aufrufe auf und beantwortet sie wie der echte Kernel.

use super::Session;
use crate::core::{ObjectId, UpdateMsg, UserId};
use crate::render::SceneGraph;
use crate::transport::{Kernel, KernelCall};
use glam::DVec3;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub(crate) struct FakeState {
    pub calls: Vec<KernelCall>,
    pub queue: Vec<UpdateMsg>,
    /// Antwort auf `can_refer_to`
    pub referable: bool,
    /// Antwort auf `get_closest_point` (sonst der angefragte Punkt)
    pub closest: Option<DVec3>,
    meta: HashMap<ObjectId, Value>,
}

impl FakeState {
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.iter().map(KernelCall::func_name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.func_name() == name).count()
    }

    fn changed(&mut self, id: ObjectId) {
        let meta = self
            .meta
            .get(&id)
            .cloned()
            .unwrap_or_else(|| json!({ "type": "Unknown" }));
        let msg = if meta["type"] == json!("Dimension") {
            UpdateMsg::Other {
                data: json!({ "id": id, "metadata": meta }),
            }
        } else {
            UpdateMsg::Mesh {
                data: crate::core::MeshData {
                    id,
                    positions: Vec::new(),
                    indices: Vec::new(),
                    metadata: Some(meta),
                },
            }
        };
        self.queue.push(msg);
    }
}

pub(crate) struct FakeKernel {
    state: Rc<RefCell<FakeState>>,
}

impl Kernel for FakeKernel {
    fn call(&mut self, _user: &UserId, call: &KernelCall) -> anyhow::Result<()> {
        let mut st = self.state.borrow_mut();
        st.calls.push(call.clone());
        match call {
            KernelCall::AddObject { object, .. } => {
                let id: ObjectId = serde_json::from_value(object.obj["id"].clone())?;
                let mut meta = json!({ "type": object.object_type });
                if object.object_type == "Wall" {
                    meta["First"] = object.obj["first_pt"]["geom"]["pt"].clone();
                    meta["Second"] = object.obj["second_pt"]["geom"]["pt"].clone();
                }
                st.meta.insert(id, meta);
                st.changed(id);
            }
            KernelCall::JoinAtPoints { id_1, id_2, .. } => {
                st.changed(*id_1);
                st.changed(*id_2);
            }
            KernelCall::SnapToPoint { id, .. }
            | KernelCall::SnapToLine { id, .. }
            | KernelCall::MoveObject { id, .. }
            | KernelCall::SetObjectData { id, .. } => st.changed(*id),
            KernelCall::MoveObjects { ids, .. } => {
                for id in ids {
                    st.changed(*id);
                }
            }
            KernelCall::SetObjectDatas { data, .. } => {
                for (id, _) in data {
                    st.changed(*id);
                }
            }
            KernelCall::DeleteObject { id, .. } => {
                st.meta.remove(id);
                st.queue.push(UpdateMsg::Delete { key: *id });
            }
            KernelCall::CanReferTo { query, .. } => {
                let data = json!(st.referable);
                st.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data,
                });
            }
            KernelCall::GetClosestPoint { pt, query, .. } => {
                let data = match st.closest {
                    Some(p) => json!({ "x": p.x, "y": p.y, "z": p.z }),
                    None => json!(pt),
                };
                st.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data,
                });
            }
            KernelCall::GetObjectData { id, prop, query, .. } => {
                let data = st.meta.get(id).map(|m| m[prop.as_str()].clone());
                st.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data: data.unwrap_or(Value::Null),
                });
            }
            KernelCall::CopyObjects { ids, query, .. } => {
                let copies: Vec<ObjectId> = ids.iter().map(|_| ObjectId::new()).collect();
                for (src, copy) in ids.iter().zip(&copies) {
                    let meta = st.meta.get(src).cloned().unwrap_or_else(|| json!({}));
                    st.meta.insert(*copy, meta);
                }
                st.queue.push(UpdateMsg::Read {
                    query_id: *query,
                    data: json!(copies),
                });
                for copy in copies {
                    st.changed(copy);
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

/// Session mit Test-Kernel und geöffneter Datei `test.flx`.
pub(crate) fn fake_session() -> (Session, Rc<RefCell<FakeState>>) {
    let state = Rc::new(RefCell::new(FakeState::default()));
    let kernel = FakeKernel {
        state: Rc::clone(&state),
    };
    let session = Session::local(kernel, Box::new(SceneGraph::new()), UserId::new());
    session.init_file("test.flx").expect("Datei anlegen");
    state.borrow_mut().calls.clear();
    (session, state)
}

/// Verarbeitet alle vom Test-Kernel erzeugten Nachrichten.
pub(crate) fn flush(session: &Session, state: &Rc<RefCell<FakeState>>) {
    let batch = std::mem::take(&mut state.borrow_mut().queue);
    session.handle_updates(batch);
}
