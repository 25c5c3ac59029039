//! Headless Szene: hält gerenderte Objekte in Einfüge-Reihenfolge.

use super::{Geometry, Material, RenderedObject, SceneAdapter};
use crate::core::{MeshData, ObjectId};
use indexmap::IndexMap;
use serde_json::Value;

/// Szene ohne GPU. Wird vom Binary und in Tests verwendet.
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: IndexMap<ObjectId, RenderedObject>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedObject> {
        self.objects.values()
    }

    /// Anzahl der Objekte, die vom Kernel bestätigt wurden.
    pub fn committed_count(&self) -> usize {
        self.objects.values().filter(|o| !o.temporary).count()
    }

    fn upsert(&mut self, id: ObjectId, geometry: Geometry, temporary: bool) {
        match self.objects.get_mut(&id) {
            Some(existing) => {
                // Material und Hover bleiben beim Neu-Rendern erhalten
                existing.geometry = geometry;
                existing.temporary = temporary;
            }
            None => {
                self.objects
                    .insert(id, RenderedObject::new(id, geometry, temporary));
            }
        }
    }
}

impl SceneAdapter for SceneGraph {
    fn render_mesh(&mut self, mesh: &MeshData, temporary: bool) {
        self.upsert(mesh.id, Geometry::Mesh(mesh.clone()), temporary);
    }

    fn render_object(&mut self, descriptor: &Value, id: ObjectId, temporary: bool) {
        self.upsert(id, Geometry::Descriptor(descriptor.clone()), temporary);
    }

    fn delete_mesh(&mut self, id: &ObjectId) {
        self.objects.shift_remove(id);
    }

    fn get_mesh(&self, id: &ObjectId) -> Option<RenderedObject> {
        self.objects.get(id).cloned()
    }

    fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    fn set_material(&mut self, id: &ObjectId, material: Material) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.material = material;
        }
    }

    fn set_hover(&mut self, id: &ObjectId, hovered: bool) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.hovered = hovered;
        }
    }

    fn reset(&mut self) {
        self.objects.clear();
    }
}
