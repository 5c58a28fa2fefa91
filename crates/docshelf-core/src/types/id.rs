//! Newtype wrappers around [`uuid::Uuid`] for store-assigned row identities.
//!
//! Distinct types keep a folder id from being passed where an assignment
//! id is expected. Both serialize transparently as UUID strings, which is
//! how the table store hands them back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for crate::types::filter::FilterValue {
            fn from(id: $name) -> Self {
                Self::String(id.0.to_string())
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `smart_folders`.
    SmartFolderId
);

define_id!(
    /// Identifier of a row in `smart_folder_assignments`.
    AssignmentId
);
