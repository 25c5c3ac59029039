use super::{graphic_point, model_point, DataObject, KernelObject};
use crate::core::geometry::perp_2d;
use crate::core::ids::ObjectId;
use crate::core::messages::UpdateMsg;
use glam::DVec3;
use serde_json::json;

/// Bemaßungslinie zwischen zwei Punkten mit seitlichem Versatz.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    id: ObjectId,
    pub first: DVec3,
    pub second: DVec3,
    pub offset: f64,
}

impl Dimension {
    pub fn new(first: DVec3, second: DVec3, offset: f64) -> Self {
        Self {
            id: ObjectId::new(),
            first,
            second,
            offset,
        }
    }

    /// Gemessener Abstand, wie er als Text angezeigt wird.
    pub fn distance(&self) -> f64 {
        (self.second - self.first).length()
    }

    fn descriptor(&self) -> serde_json::Value {
        let perp = perp_2d(self.first, self.second).unwrap_or(DVec3::ZERO);
        let line_1 = self.first + perp * self.offset;
        let line_2 = self.second + perp * self.offset;
        let text_pos = line_1 + (line_2 - line_1) * 0.5;
        json!({
            "id": self.id,
            "first": graphic_point(self.first),
            "first_off": graphic_point(line_1),
            "second": graphic_point(self.second),
            "second_off": graphic_point(line_2),
            "text_pos": graphic_point(text_pos),
            "text": format!("{:.3}", self.distance()),
            "offset": self.offset,
            "metadata": {
                "type": self.type_name(),
                "Offset": self.offset,
            },
        })
    }
}

impl DataObject for Dimension {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn type_name(&self) -> &'static str {
        "Dimension"
    }

    fn temp_repr(&self) -> UpdateMsg {
        UpdateMsg::Other {
            data: self.descriptor(),
        }
    }

    fn kernel_object(&self) -> KernelObject {
        KernelObject {
            object_type: self.type_name().to_string(),
            obj: json!({
                "id": self.id,
                "first": { "geom": { "pt": model_point(self.first) } },
                "second": { "geom": { "pt": model_point(self.second) } },
                "offset": self.offset,
            }),
        }
    }

    fn move_obj(&mut self, delta: DVec3) {
        self.first += delta;
        self.second += delta;
    }
}
