use super::{model_point, non_degenerate, DataObject, KernelObject};
use crate::core::geometry::rectangular_prism;
use crate::core::ids::ObjectId;
use crate::core::messages::{MeshData, UpdateMsg};
use glam::DVec3;
use serde_json::json;

/// Gerade Wand zwischen zwei Grundrisspunkten.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    id: ObjectId,
    pub first: DVec3,
    pub second: DVec3,
    pub width: f64,
    pub height: f64,
}

impl Wall {
    pub fn new(first: DVec3, second: DVec3, width: f64, height: f64) -> Self {
        Self {
            id: ObjectId::new(),
            first,
            second,
            width,
            height,
        }
    }

    /// Wandlänge im Grundriss.
    pub fn length(&self) -> f64 {
        (self.second - self.first).truncate().length()
    }
}

impl DataObject for Wall {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn type_name(&self) -> &'static str {
        "Wall"
    }

    fn temp_repr(&self) -> UpdateMsg {
        let mut mesh = MeshData::empty(self.id);
        let second = non_degenerate(self.first, self.second);
        rectangular_prism(self.first, second, self.width * 0.5, self.height, &mut mesh);
        mesh.metadata = Some(json!({
            "type": self.type_name(),
            "Width": self.width,
            "Height": self.height,
            "First": model_point(self.first),
            "Second": model_point(self.second),
        }));
        UpdateMsg::Mesh { data: mesh }
    }

    fn kernel_object(&self) -> KernelObject {
        KernelObject {
            object_type: self.type_name().to_string(),
            obj: json!({
                "id": self.id,
                "first_pt": { "geom": { "pt": model_point(self.first) } },
                "second_pt": { "geom": { "pt": model_point(self.second) } },
                "width": self.width,
                "height": self.height,
                "openings": [],
            }),
        }
    }

    fn move_obj(&mut self, delta: DVec3) {
        self.first += delta;
        self.second += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_repr_is_tagged_wall_mesh() {
        let wall = Wall::new(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), 1.0, 5.0);
        match wall.temp_repr() {
            UpdateMsg::Mesh { data } => {
                assert_eq!(data.id, wall.id());
                assert_eq!(data.vertex_count(), 8);
                let kind = data.metadata.as_ref().and_then(|m| m.get("type"));
                assert_eq!(kind, Some(&json!("Wall")));
            }
            other => panic!("Mesh erwartet, erhalten: {:?}", other),
        }
    }

    #[test]
    fn test_kernel_object_carries_endpoints() {
        let wall = Wall::new(DVec3::new(1.0, 2.0, 0.0), DVec3::new(4.0, 2.0, 0.0), 1.0, 5.0);
        let obj = wall.kernel_object();
        assert_eq!(obj.object_type, "Wall");
        assert_eq!(obj.obj["first_pt"]["geom"]["pt"]["y"], json!(2.0));
        assert_eq!(obj.obj["second_pt"]["geom"]["pt"]["x"], json!(4.0));
        assert_eq!(obj.obj["id"], json!(wall.id().to_string()));
    }
}
