//! The persistence boundary: permission sets as lists of `resource:action`
//! strings.
//!
//! Parsing deduplicates and validates every entry against the catalog. What
//! happens to invalid entries is decided by [`BoundaryPolicy`]; the default
//! rejects the whole submission so a weaker-than-intended grant is never
//! persisted silently.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::code::PermissionCode;
use crate::errors::{PermissionError, Result};
use crate::set::PermissionSet;

/// How the boundary treats entries the catalog rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Any invalid entry rejects the whole set.
    #[default]
    Reject,
    /// Invalid entries are removed and reported.
    Strip,
}

impl BoundaryPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryPolicy::Reject => "reject",
            BoundaryPolicy::Strip => "strip",
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(BoundaryPolicy::Reject),
            "strip" => Ok(BoundaryPolicy::Strip),
            other => Err(format!("unknown boundary policy: {other}")),
        }
    }
}

/// A parsed wire set and the raw entries stripped from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSet {
    pub permissions: PermissionSet,
    /// Always empty under [`BoundaryPolicy::Reject`].
    pub stripped: Vec<String>,
}

/// Parse wire entries into a validated set.
///
/// # Errors
///
/// Under [`BoundaryPolicy::Reject`], returns
/// [`PermissionError::InvalidPermissionCode`] listing every rejected entry.
/// A fail-closed catalog always yields `CatalogUnavailable`, whatever the
/// policy, unless the input is empty.
pub fn parse<I, S>(catalog: &Catalog, entries: I, policy: BoundaryPolicy) -> Result<ParsedSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedSet::default();
    let mut rejected = Vec::new();

    for entry in entries {
        let raw = entry.as_ref();
        let code = match PermissionCode::parse(raw) {
            Ok(code) => code,
            Err(_) => {
                rejected.push(raw.trim().to_string());
                continue;
            }
        };

        match catalog.check(&code) {
            Ok(()) => {
                parsed.permissions.insert(code);
            }
            Err(e @ PermissionError::CatalogUnavailable(_)) => return Err(e),
            Err(_) => rejected.push(code.as_string()),
        }
    }

    let mut seen = HashSet::new();
    rejected.retain(|entry| seen.insert(entry.clone()));
    if rejected.is_empty() {
        return Ok(parsed);
    }

    match policy {
        BoundaryPolicy::Reject => Err(PermissionError::invalid_codes(rejected)),
        BoundaryPolicy::Strip => {
            warn!(
                stripped = %rejected.join(", "),
                "Stripping invalid permissions at boundary"
            );
            parsed.stripped = rejected;
            Ok(parsed)
        }
    }
}

/// Render a set for persistence, in canonical catalog order.
pub fn to_wire(catalog: &Catalog, set: &PermissionSet) -> Vec<String> {
    set.canonical(catalog)
        .into_iter()
        .map(PermissionCode::as_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_deduplicates_entries() {
        let catalog = Catalog::builtin();
        let parsed = parse(
            &catalog,
            ["member:read", "member:read", "account:create"],
            BoundaryPolicy::Reject,
        )
        .unwrap();
        assert_eq!(parsed.permissions.len(), 2);
        assert!(parsed.stripped.is_empty());
    }

    #[test]
    fn reject_policy_rejects_whole_set() {
        let catalog = Catalog::builtin();
        let err = parse(
            &catalog,
            ["member:read", "ghost:read", "not a code"],
            BoundaryPolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(err.rejected_codes(), &["ghost:read", "not a code"]);
    }

    #[test]
    fn strip_policy_keeps_valid_remainder() {
        let catalog = Catalog::builtin();
        let parsed = parse(
            &catalog,
            ["member:read", "ghost:read", "member:approve"],
            BoundaryPolicy::Strip,
        )
        .unwrap();
        assert_eq!(parsed.permissions, PermissionSet::parse(["member:read"]).unwrap());
        assert_eq!(parsed.stripped, vec!["ghost:read", "member:approve"]);
    }

    #[test]
    fn unavailable_catalog_rejects_regardless_of_policy() {
        let catalog = Catalog::unavailable("offline");
        for policy in [BoundaryPolicy::Reject, BoundaryPolicy::Strip] {
            assert!(matches!(
                parse(&catalog, ["member:read"], policy),
                Err(PermissionError::CatalogUnavailable(_))
            ));
        }
    }

    #[test]
    fn empty_submission_is_allowed() {
        let catalog = Catalog::builtin();
        let parsed = parse(&catalog, Vec::<String>::new(), BoundaryPolicy::Reject).unwrap();
        assert!(parsed.permissions.is_empty());
    }

    #[test]
    fn to_wire_is_canonical() {
        let catalog = Catalog::builtin();
        let set = PermissionSet::parse(["account:create", "member:update", "member:read"]).unwrap();
        assert_eq!(
            to_wire(&catalog, &set),
            vec!["member:read", "member:update", "account:create"]
        );
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("Reject".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Reject));
        assert_eq!(" strip ".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Strip));
        assert!("maybe".parse::<BoundaryPolicy>().is_err());
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Reject);
    }
}
