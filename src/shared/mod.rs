//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Editor-Konfiguration, die von `app`, `ui` und dem Binary
//! gleichermaßen gelesen wird.

pub mod options;

pub use options::EditorOptions;
pub use options::{DEFAULT_FILENAME, PASTE_OFFSET};
