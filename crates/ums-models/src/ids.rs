//! Strongly-typed ID newtypes for tenant entities.
//!
//! Each entity gets its own wrapper around `Uuid` so a `SchoolId` can never be
//! passed where a `FacultyId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use ums_models::ids::{FacultyId, SchoolId};
//!
//! fn parent_of(id: SchoolId) -> Option<FacultyId> { None }
//!
//! let school = SchoolId::new();
//! parent_of(school);                 // OK
//! // parent_of(FacultyId::new());    // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from a u128 value (useful for constants).
            #[inline]
            pub const fn from_u128(v: u128) -> Self {
                Self(Uuid::from_u128(v))
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a faculty.
    FacultyId
);
define_id!(
    /// Identifier of a school.
    SchoolId
);
define_id!(
    /// Identifier of a department (owned by the backend, referenced only).
    DepartmentId
);
define_id!(
    /// Identifier of a certification program.
    ProgramId
);
define_id!(
    /// Identifier of a tenant role.
    RoleId
);
define_id!(
    /// Identifier of a permission.
    PermissionId
);
