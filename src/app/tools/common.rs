//! Gemeinsame Hilfsfunktionen für Platzierungs-Werkzeuge.

use crate::core::Point3d;
use crate::render::RenderedObject;
use crate::shared::EditorOptions;
use glam::DVec3;

/// Werkzeug-Parameter aus den Editor-Optionen.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub wall_width: f64,
    pub wall_height: f64,
    pub door_width: f64,
    pub door_height: f64,
    pub door_length: f64,
    pub dimension_offset: f64,
    pub slab_thickness: f64,
    /// Zweiter Vorschaupunkt relativ zum ersten Klick
    pub preview_offset: DVec3,
    /// Zweiter Vorschaupunkt beim Fortsetzen einer Wandkette
    pub chain_preview_offset: DVec3,
}

impl ToolSettings {
    pub fn from_options(opts: &EditorOptions) -> Self {
        Self {
            wall_width: opts.wall_width,
            wall_height: opts.wall_height,
            door_width: opts.door_width,
            door_height: opts.door_height,
            door_length: opts.door_length,
            dimension_offset: opts.dimension_offset,
            slab_thickness: opts.slab_thickness,
            preview_offset: DVec3::from_array(opts.preview_offset),
            chain_preview_offset: DVec3::from_array(opts.chain_preview_offset),
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_options(&EditorOptions::default())
    }
}

/// Projiziert einen Klickpunkt auf den Boden (Z = 0).
pub fn ground(pt: DVec3) -> DVec3 {
    DVec3::new(pt.x, pt.y, 0.0)
}

/// Ist das Objekt eine Wand?
pub fn is_wall(hovered: Option<&RenderedObject>) -> bool {
    hovered.is_some_and(|obj| obj.is_type("Wall"))
}

/// Achse einer Wand aus ihren Metadaten (`First`/`Second`, Modellraum).
pub fn wall_line(obj: &RenderedObject) -> Option<(DVec3, DVec3)> {
    let meta = obj.metadata()?;
    let read = |key: &str| -> Option<DVec3> {
        let value = meta.get(key)?.clone();
        serde_json::from_value::<Point3d>(value).ok().map(DVec3::from)
    };
    Some((read("First")?, read("Second")?))
}
