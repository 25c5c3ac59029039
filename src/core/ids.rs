//! Typisierte Bezeichner für Kernel-Objekte, Undo-Events, Queries und Benutzer.
//!
//! Alle IDs sind UUIDs (v4) und werden auf dem Draht als String übertragen.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Erzeugt eine neue, zufällige ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Gibt die zugrunde liegende UUID zurück.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parst eine ID aus ihrer String-Darstellung.
            pub fn parse(value: &str) -> Option<Self> {
                Uuid::parse_str(value).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// ID eines Kernel-Objekts; identisch mit der ID des gerenderten Scene-Objekts.
    ObjectId
);
define_id!(
    /// Transaktionsgrenze im Kernel (ein Undo-Schritt).
    UndoEventId
);
define_id!(
    /// Korrelations-ID für Lese-Anfragen an den Kernel.
    QueryId
);
define_id!(
    /// Benutzer einer Session (wird im Remote-Modus als `user_id` übertragen).
    UserId
);
