use super::{model_point, non_degenerate, DataObject, KernelObject};
use crate::core::geometry::rectangular_prism;
use crate::core::ids::ObjectId;
use crate::core::messages::{MeshData, UpdateMsg};
use glam::DVec3;
use serde_json::json;

/// Tür als Segment `first → first + dir * length`.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    id: ObjectId,
    pub first: DVec3,
    dir: DVec3,
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

impl Door {
    pub fn new(first: DVec3, dir: DVec3, width: f64, height: f64, length: f64) -> Self {
        let mut door = Self {
            id: ObjectId::new(),
            first,
            dir: DVec3::X,
            width,
            height,
            length,
        };
        door.set_dir(dir);
        door
    }

    /// Setzt die Richtung (normiert); ein Nullvektor behält die alte Richtung bei.
    pub fn set_dir(&mut self, dir: DVec3) {
        if let Some(unit) = dir.truncate().extend(0.0).try_normalize() {
            self.dir = unit;
        }
    }

    pub fn dir(&self) -> DVec3 {
        self.dir
    }

    /// Freier Endpunkt des Türsegments.
    pub fn second(&self) -> DVec3 {
        self.first + self.dir * self.length
    }
}

impl DataObject for Door {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn type_name(&self) -> &'static str {
        "Door"
    }

    fn temp_repr(&self) -> UpdateMsg {
        let mut mesh = MeshData::empty(self.id);
        let second = non_degenerate(self.first, self.second());
        rectangular_prism(self.first, second, self.width * 0.5, self.height, &mut mesh);
        mesh.metadata = Some(json!({
            "type": self.type_name(),
            "Width": self.width,
            "Height": self.height,
        }));
        UpdateMsg::Mesh { data: mesh }
    }

    fn kernel_object(&self) -> KernelObject {
        KernelObject {
            object_type: self.type_name().to_string(),
            obj: json!({
                "id": self.id,
                "dir": { "geom": {
                    "pt_1": model_point(self.first),
                    "pt_2": model_point(self.second()),
                } },
                "width": self.width,
                "height": self.height,
            }),
        }
    }

    fn move_obj(&mut self, delta: DVec3) {
        self.first += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_second_point_follows_direction_and_length() {
        let mut door = Door::new(DVec3::ZERO, DVec3::new(0.0, 3.0, 0.0), 1.0, 4.0, 2.0);
        assert_relative_eq!(door.second().y, 2.0);

        door.set_dir(DVec3::ZERO);
        assert_relative_eq!(door.second().y, 2.0);

        door.set_dir(DVec3::new(-5.0, 0.0, 0.0));
        assert_relative_eq!(door.second().x, -2.0);
    }
}
