//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the planner has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. All IDs use UUID v7 (time-ordered)
//! so that persisted shows sort naturally by creation time.
//!
//! Timeline relations (which firework depends on which) are keyed strictly
//! by these IDs -- never by the mutable, non-unique display name.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a single firework on the timeline.
    FireworkId
}

define_id! {
    /// Unique identifier for a saved show document.
    ShowId
}

define_id! {
    /// Unique identifier for the owner of a saved show.
    OwnerId
}
