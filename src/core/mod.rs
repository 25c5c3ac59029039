//! Core-Domänentypen: IDs, Kernel-Nachrichten, Geometrie, Baustein-Objekte.

pub mod geometry;
pub mod ids;
pub mod messages;
/// Client-seitige Objekte mit Vorschau- und Kernel-Darstellung
pub mod objects;

pub use geometry::{graphic_to_model, model_to_graphic, Point3d};
pub use ids::{ObjectId, QueryId, UndoEventId, UserId};
pub use messages::{MeshData, UpdateMsg};
pub use objects::{DataObject, Dimension, Door, KernelObject, Slab, Wall};
