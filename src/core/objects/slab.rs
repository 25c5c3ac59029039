use super::{model_point, DataObject, KernelObject};
use crate::core::geometry::rectangular_prism;
use crate::core::ids::ObjectId;
use crate::core::messages::{MeshData, UpdateMsg};
use glam::DVec3;
use serde_json::json;

/// Rechteckige Deckenplatte, aufgespannt von zwei diagonalen Ecken.
#[derive(Debug, Clone, PartialEq)]
pub struct Slab {
    id: ObjectId,
    pub corner_a: DVec3,
    pub corner_b: DVec3,
    pub thickness: f64,
}

impl Slab {
    pub fn new(corner_a: DVec3, corner_b: DVec3, thickness: f64) -> Self {
        Self {
            id: ObjectId::new(),
            corner_a,
            corner_b,
            thickness,
        }
    }

    /// Minimum/Maximum des Grundrisses (Z aus `corner_a`).
    pub fn bounds(&self) -> (DVec3, DVec3) {
        let min = self.corner_a.min(self.corner_b);
        let max = self.corner_a.max(self.corner_b);
        (min.truncate().extend(self.corner_a.z), max.truncate().extend(self.corner_a.z))
    }
}

impl DataObject for Slab {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn type_name(&self) -> &'static str {
        "Slab"
    }

    fn temp_repr(&self) -> UpdateMsg {
        let (min, max) = self.bounds();
        let mid_y = (min.y + max.y) * 0.5;
        let half_depth = ((max.y - min.y) * 0.5).max(0.005);
        let end_x = if max.x - min.x <= f64::EPSILON {
            min.x + 0.01
        } else {
            max.x
        };

        let mut mesh = MeshData::empty(self.id);
        rectangular_prism(
            DVec3::new(min.x, mid_y, min.z),
            DVec3::new(end_x, mid_y, min.z),
            half_depth,
            self.thickness,
            &mut mesh,
        );
        mesh.metadata = Some(json!({
            "type": self.type_name(),
            "Thickness": self.thickness,
        }));
        UpdateMsg::Mesh { data: mesh }
    }

    fn kernel_object(&self) -> KernelObject {
        let (min, max) = self.bounds();
        KernelObject {
            object_type: self.type_name().to_string(),
            obj: json!({
                "id": self.id,
                "min": model_point(min),
                "max": model_point(max),
                "thickness": self.thickness,
            }),
        }
    }

    fn move_obj(&mut self, delta: DVec3) {
        self.corner_a += delta;
        self.corner_b += delta;
    }
}
