//! Geometrie-Hilfen: Draht-Punkttyp, Koordinatentransformation, Prismen-Mesh.
//!
//! Modellraum: Z zeigt nach oben. Grafikraum (Renderer): Y zeigt nach oben,
//! die Modell-Y-Achse liegt auf der negativen Grafik-Z-Achse.

use super::messages::MeshData;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Punkt/Vektor im Drahtformat des Kernels (`{x, y, z}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<DVec3> for Point3d {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3d> for DVec3 {
    fn from(p: Point3d) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

/// Rechnet einen Punkt aus dem Grafikraum (Picking) in den Modellraum um.
pub fn graphic_to_model(point: DVec3) -> DVec3 {
    DVec3::new(point.x, -point.z, point.y)
}

/// Rechnet einen Punkt aus dem Modellraum in den Grafikraum um.
pub fn model_to_graphic(point: DVec3) -> DVec3 {
    DVec3::new(point.x, point.z, -point.y)
}

/// Projiziert einen Punkt auf die Ebene Z = 0 (Grundriss).
pub fn flatten(point: DVec3) -> DVec3 {
    DVec3::new(point.x, point.y, 0.0)
}

/// Einheits-Normale in der XY-Ebene (links von `first → second`).
///
/// Gibt `None` zurück wenn beide Punkte zusammenfallen.
pub fn perp_2d(first: DVec3, second: DVec3) -> Option<DVec3> {
    let dir = flatten(second - first);
    dir.cross(DVec3::Z).try_normalize()
}

/// Projiziert `point` auf das Segment `first..second` (geklemmt auf die Endpunkte).
pub fn project_on_segment(first: DVec3, second: DVec3, point: DVec3) -> DVec3 {
    let dir = second - first;
    let len_sq = dir.length_squared();
    if len_sq <= f64::EPSILON {
        return first;
    }
    let t = ((point - first).dot(dir) / len_sq).clamp(0.0, 1.0);
    first + dir * t
}

/// Hängt einen Modellpunkt (bereits in Grafikraum transformiert) an das Mesh an.
fn push_pt(mesh: &mut MeshData, pt: DVec3) {
    let g = model_to_graphic(pt);
    mesh.positions.extend_from_slice(&[g.x, g.y, g.z]);
}

/// Erzeugt ein Quader-Prisma entlang `first → second` mit halber Breite `width`
/// und Höhe `height` (8 Eckpunkte, 12 Dreiecke).
pub fn rectangular_prism(first: DVec3, second: DVec3, width: f64, height: f64, mesh: &mut MeshData) {
    let offset = perp_2d(first, second).unwrap_or(DVec3::Y) * width;
    let up = DVec3::Z * height;
    let base = [first + offset, first - offset, second + offset, second - offset];

    let start = (mesh.positions.len() / 3) as u64;
    for corner in base {
        push_pt(mesh, corner);
    }
    for corner in base {
        push_pt(mesh, corner + up);
    }

    const FACES: [[u64; 3]; 12] = [
        [0, 1, 2],
        [1, 2, 3],
        [0, 1, 5],
        [0, 5, 4],
        [4, 5, 7],
        [4, 7, 6],
        [1, 3, 7],
        [1, 7, 5],
        [2, 3, 7],
        [2, 7, 6],
        [2, 0, 4],
        [2, 4, 6],
    ];
    for face in FACES {
        mesh.indices.extend(face.iter().map(|i| start + i));
    }
}
