//! FLX-Editor Library.
//! Editier-Session-Kern (Transport, Pending-Registry, Werkzeuge) als Library
//! exportiert für Tests, Benchmarks und eingebettete Hosts.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod transport;
pub mod ui;

pub use app::{
    AppCommand, AppIntent, EditorController, EditorState, EditorTool, Pending, Session,
    SessionError,
};
pub use core::{
    graphic_to_model, model_to_graphic, DataObject, Dimension, Door, MeshData, ObjectId, Point3d,
    QueryId, Slab, UndoEventId, UpdateMsg, UserId, Wall,
};
pub use render::{Material, RenderedObject, SceneAdapter, SceneGraph};
pub use shared::EditorOptions;
pub use transport::{Kernel, KernelCall, Transport, TransportError, TransportMode};
