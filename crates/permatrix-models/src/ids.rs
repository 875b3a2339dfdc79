//! Strongly-typed ID newtypes.
//!
//! # Example
//!
//! ```
//! use permatrix_models::ids::TemplateId;
//!
//! let id = TemplateId::new();
//! let parsed: TemplateId = id.to_string().parse().unwrap();
//! assert_eq!(id, parsed);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a [`PermissionTemplate`](crate::templates::PermissionTemplate).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
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

    #[inline]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateId({})", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for TemplateId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<TemplateId> for Uuid {
    #[inline]
    fn from(id: TemplateId) -> Uuid {
        id.0
    }
}
