//! Typen der Szene: gerenderte Objekte und ihre Materialien.

use crate::core::{MeshData, ObjectId};
use serde_json::Value;

/// Materialzustand eines gerenderten Objekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    #[default]
    Default,
    /// Hervorhebung für selektierte Objekte
    Selected,
}

/// Geometrie-Quelle eines gerenderten Objekts.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Dreiecksnetz (Wände, Türen, Decken)
    Mesh(MeshData),
    /// Freier Deskriptor (Bemaßungen)
    Descriptor(Value),
}

/// Ein Objekt in der Szene. ID identisch mit der Kernel-ID.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedObject {
    pub id: ObjectId,
    pub geometry: Geometry,
    /// Vorschau-Objekt ohne Kernel-Gegenstück
    pub temporary: bool,
    pub material: Material,
    pub hovered: bool,
}

impl RenderedObject {
    pub fn new(id: ObjectId, geometry: Geometry, temporary: bool) -> Self {
        Self {
            id,
            geometry,
            temporary,
            material: Material::Default,
            hovered: false,
        }
    }

    /// Metadaten (`type`, Eigenschaften) des Objekts.
    pub fn metadata(&self) -> Option<&Value> {
        match &self.geometry {
            Geometry::Mesh(mesh) => mesh.metadata.as_ref(),
            Geometry::Descriptor(data) => data.get("metadata"),
        }
    }

    /// Objekttyp aus den Metadaten, z.B. `"Wall"`.
    pub fn object_type(&self) -> Option<&str> {
        self.metadata()
            .and_then(|meta| meta.get("type"))
            .and_then(Value::as_str)
    }

    pub fn is_type(&self, object_type: &str) -> bool {
        self.object_type() == Some(object_type)
    }

    pub fn is_selected(&self) -> bool {
        self.material == Material::Selected
    }
}
