//! The canonical `resource:action` permission code.
//!
//! A [`PermissionCode`] is only *syntactically* valid on its own. Whether it
//! names something grantable is decided by the [`Catalog`](crate::Catalog).
//!
//! # Example
//!
//! ```
//! use permatrix_core::PermissionCode;
//!
//! let code: PermissionCode = " Member:Read ".parse().unwrap();
//! assert_eq!(code.as_string(), "member:read");
//! assert_eq!(code.resource(), "member");
//! assert_eq!(code.action(), "read");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{PermissionError, Result};

/// Separator between the resource and action halves of a code.
pub const SEPARATOR: char = ':';

/// A single grantable capability: an action on a resource.
///
/// Both halves are stored in canonical form (lowercase, trimmed, made of
/// `[a-z0-9_]`). Ordering is lexicographic on `(resource, action)`; display
/// ordering by catalog position goes through
/// [`Catalog::canonical_cmp`](crate::Catalog::canonical_cmp).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionCode {
    resource: String,
    action: String,
}

impl PermissionCode {
    /// Build a code from its two halves, canonicalizing each.
    pub fn new(resource: &str, action: &str) -> Result<Self> {
        let resource = canonical_identifier(resource);
        let action = canonical_identifier(action);

        if !is_identifier(&resource) || !is_identifier(&action) {
            return Err(PermissionError::invalid_code(format!(
                "{}{}{}",
                resource, SEPARATOR, action
            )));
        }

        Ok(Self { resource, action })
    }

    /// Parse a `resource:action` string.
    pub fn parse(raw: &str) -> Result<Self> {
        let (resource, action) = raw
            .trim()
            .split_once(SEPARATOR)
            .ok_or_else(|| PermissionError::invalid_code(raw.trim()))?;

        Self::new(resource, action).map_err(|_| PermissionError::invalid_code(raw.trim()))
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Render the code in wire form.
    pub fn as_string(&self) -> String {
        format!("{}{}{}", self.resource, SEPARATOR, self.action)
    }
}

/// Canonical form of a resource or action identifier.
pub(crate) fn canonical_identifier(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Whether `value` is a non-empty `[a-z0-9_]+` identifier.
pub(crate) fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

impl fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.resource, SEPARATOR, self.action)
    }
}

impl FromStr for PermissionCode {
    type Err = PermissionError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for PermissionCode {
    type Error = PermissionError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for PermissionCode {
    type Error = PermissionError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PermissionCode> for String {
    fn from(code: PermissionCode) -> Self {
        code.as_string()
    }
}
