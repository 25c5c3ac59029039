//! Szenen-Anbindung: der Renderer wird nur über `SceneAdapter` angesprochen.

mod scene_graph;
mod types;

pub use scene_graph::SceneGraph;
pub use types::{Geometry, Material, RenderedObject};

use crate::core::{MeshData, ObjectId, UpdateMsg};
use serde_json::Value;

/// Schmale Renderer-Schnittstelle der Session.
///
/// Objekte werden über ihre Kernel-ID adressiert. Vorschau-Objekte
/// (`temporary = true`) teilen sich denselben ID-Raum.
pub trait SceneAdapter {
    /// Rendert oder aktualisiert ein Dreiecksnetz unter `mesh.id`.
    fn render_mesh(&mut self, mesh: &MeshData, temporary: bool);

    /// Rendert oder aktualisiert ein Deskriptor-Objekt (z.B. Bemaßung).
    fn render_object(&mut self, descriptor: &Value, id: ObjectId, temporary: bool);

    /// Entfernt ein Objekt. Unbekannte IDs werden ignoriert.
    fn delete_mesh(&mut self, id: &ObjectId);

    fn get_mesh(&self, id: &ObjectId) -> Option<RenderedObject>;

    /// Alle IDs in der Szene.
    fn ids(&self) -> Vec<ObjectId>;

    fn set_material(&mut self, id: &ObjectId, material: Material);

    fn set_hover(&mut self, id: &ObjectId, hovered: bool);

    /// Leert die Szene (neue oder geöffnete Datei).
    fn reset(&mut self);

    /// Rendert eine `Mesh`/`Other`-Nachricht und gibt die betroffene ID zurück.
    fn render_update(&mut self, msg: &UpdateMsg, temporary: bool) -> Option<ObjectId> {
        match msg {
            UpdateMsg::Mesh { data } => {
                self.render_mesh(data, temporary);
                Some(data.id)
            }
            UpdateMsg::Other { data } => {
                let id = msg.rendered_id()?;
                self.render_object(data, id, temporary);
                Some(id)
            }
            _ => None,
        }
    }
}
