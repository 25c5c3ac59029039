//! Client-seitige Baustein-Objekte (Wand, Tür, Bemaßung, Decke).
//!
//! Jedes Objekt kennt seine temporäre Darstellung (Vorschau ohne Kernel-Roundtrip)
//! und seine persistente Form für `add_object`.

mod dimension;
mod door;
mod slab;
mod wall;

pub use dimension::Dimension;
pub use door::Door;
pub use slab::Slab;
pub use wall::Wall;

use super::geometry::{model_to_graphic, Point3d};
use super::ids::ObjectId;
use super::messages::UpdateMsg;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persistente Form eines Objekts: `{"type": "...", "obj": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub obj: Value,
}

/// Gemeinsame Schnittstelle aller Objekte, die über `create_obj` angelegt werden.
pub trait DataObject {
    /// Objekt-ID (identisch für Vorschau und Kernel-Objekt).
    fn id(&self) -> ObjectId;

    /// Objekttyp, wie er in den Mesh-Metadaten erscheint.
    fn type_name(&self) -> &'static str;

    /// Vorschau-Darstellung als Kernel-Nachricht (`Mesh` oder `Other`).
    fn temp_repr(&self) -> UpdateMsg;

    /// Serialisierte Form für den `add_object`-Aufruf.
    fn kernel_object(&self) -> KernelObject;

    /// Verschiebt das Objekt lokal um `delta`.
    fn move_obj(&mut self, delta: DVec3);
}

/// Punkt im Drahtformat (Modellraum).
pub(crate) fn model_point(pt: DVec3) -> Value {
    let p = Point3d::from(pt);
    serde_json::json!({ "x": p.x, "y": p.y, "z": p.z })
}

/// Punkt im Drahtformat (Grafikraum).
pub(crate) fn graphic_point(pt: DVec3) -> Value {
    model_point(model_to_graphic(pt))
}

/// Verschiebt den zweiten Punkt, falls er mit dem ersten zusammenfällt.
///
/// Ein Prisma der Länge 0 hätte keine Richtung.
pub(crate) fn non_degenerate(first: DVec3, second: DVec3) -> DVec3 {
    if (second - first).length_squared() <= f64::EPSILON {
        first + DVec3::X * 0.01
    } else {
        second
    }
}
