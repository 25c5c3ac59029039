//! Nachrichten, die der Kernel asynchron ausgibt (Push im Remote-Modus, Polling lokal).
//!
//! Drahtformat: extern getaggte JSON-Objekte, z.B. `{"Mesh": {"data": {...}}}`.

use super::ids::{ObjectId, QueryId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dreiecksnetz eines Objekts im Grafikraum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub id: ObjectId,
    #[serde(default)]
    pub positions: Vec<f64>,
    #[serde(default)]
    pub indices: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl MeshData {
    /// Leeres Mesh für die angegebene Objekt-ID.
    pub fn empty(id: ObjectId) -> Self {
        Self {
            id,
            positions: Vec::new(),
            indices: Vec::new(),
            metadata: None,
        }
    }

    /// Anzahl der Eckpunkte (je drei Koordinaten).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Eine einzelne Kernel-Benachrichtigung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdateMsg {
    /// Fachlicher Fehler. `query_id`/`key` sind optional und erlauben die
    /// Zuordnung zu wartenden Aufrufern.
    Error {
        msg: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query_id: Option<QueryId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<ObjectId>,
    },
    /// Objekt wurde im Kernel gelöscht.
    Delete { key: ObjectId },
    /// Ergebnis einer Lese-Anfrage.
    Read { query_id: QueryId, data: Value },
    /// Geändertes Objekt mit Dreiecksnetz.
    Mesh { data: MeshData },
    /// Geändertes Objekt mit freiem JSON-Deskriptor (z.B. Bemaßungen).
    Other { data: Value },
}

impl UpdateMsg {
    /// ID des Objekts, das durch diese Nachricht gerendert wird (nur `Mesh`/`Other`).
    pub fn rendered_id(&self) -> Option<ObjectId> {
        match self {
            UpdateMsg::Mesh { data } => Some(data.id),
            UpdateMsg::Other { data } => descriptor_id(data),
            _ => None,
        }
    }

    /// Kurzname der Variante für Logausgaben.
    pub fn kind(&self) -> &'static str {
        match self {
            UpdateMsg::Error { .. } => "Error",
            UpdateMsg::Delete { .. } => "Delete",
            UpdateMsg::Read { .. } => "Read",
            UpdateMsg::Mesh { .. } => "Mesh",
            UpdateMsg::Other { .. } => "Other",
        }
    }
}

/// Liest das `id`-Feld aus einem `Other`-Deskriptor.
pub fn descriptor_id(data: &Value) -> Option<ObjectId> {
    data.get("id").and_then(Value::as_str).and_then(ObjectId::parse)
}
