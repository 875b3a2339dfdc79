//! Pure set operations over [`PermissionSet`].
//!
//! Every operation takes the caller's set by reference and returns a new one,
//! so an editor can keep previous states around for undo. Only [`grant`] can
//! fail; the rest are total.
//!
//! # Example
//!
//! ```
//! use permatrix_core::{Catalog, PermissionCode, PermissionSet, algebra};
//!
//! let catalog = Catalog::builtin();
//! let read = PermissionCode::parse("member:read").unwrap();
//!
//! let granted = algebra::grant(&catalog, &PermissionSet::new(), &read).unwrap();
//! assert!(algebra::contains(&granted, &read));
//!
//! let toggled = algebra::toggle(&catalog, &granted, &read);
//! assert!(toggled.is_empty());
//! ```

use tracing::warn;

use crate::catalog::Catalog;
use crate::code::PermissionCode;
use crate::errors::Result;
use crate::set::PermissionSet;

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    /// Offending codes, in lexicographic order.
    pub invalid_codes: Vec<PermissionCode>,
}

/// Add `code` to a copy of `set`.
///
/// # Errors
///
/// [`PermissionError::InvalidPermissionCode`](crate::PermissionError) when the
/// catalog rejects the code, or `CatalogUnavailable` on a fail-closed catalog.
pub fn grant(catalog: &Catalog, set: &PermissionSet, code: &PermissionCode) -> Result<PermissionSet> {
    catalog.check(code)?;

    let mut next = set.clone();
    next.insert(code.clone());
    Ok(next)
}

pub fn revoke(set: &PermissionSet, code: &PermissionCode) -> PermissionSet {
    let mut next = set.clone();
    next.remove(code);
    next
}

/// Grant when absent, revoke when present.
///
/// Toggling on an absent code the catalog rejects leaves the set unchanged.
pub fn toggle(catalog: &Catalog, set: &PermissionSet, code: &PermissionCode) -> PermissionSet {
    if set.contains(code) {
        return revoke(set, code);
    }

    match grant(catalog, set, code) {
        Ok(next) => next,
        Err(e) => {
            warn!(permission = %code, error = %e, "Ignoring toggle of invalid permission");
            set.clone()
        }
    }
}

pub fn union(a: &PermissionSet, b: &PermissionSet) -> PermissionSet {
    let mut next = a.clone();
    next.extend(b.iter().cloned());
    next
}

pub fn contains(set: &PermissionSet, code: &PermissionCode) -> bool {
    set.contains(code)
}

/// Partition `set` against the catalog.
pub fn validate(catalog: &Catalog, set: &PermissionSet) -> Validation {
    let invalid_codes: Vec<PermissionCode> = set
        .iter()
        .filter(|code| !catalog.is_valid(code))
        .cloned()
        .collect();

    Validation {
        valid: invalid_codes.is_empty(),
        invalid_codes,
    }
}

/// Split `set` into its valid part and the codes the catalog rejects.
pub fn retain_valid(catalog: &Catalog, set: &PermissionSet) -> (PermissionSet, Vec<PermissionCode>) {
    let mut dropped = Vec::new();
    let mut kept = set.clone();
    kept.retain(|code| {
        let valid = catalog.is_valid(code);
        if !valid {
            dropped.push(code.clone());
        }
        valid
    });
    (kept, dropped)
}

/// Grant every action the catalog allows on `resource` ("select row").
///
/// Unknown resources leave the set unchanged.
pub fn grant_resource(catalog: &Catalog, set: &PermissionSet, resource: &str) -> PermissionSet {
    let mut next = set.clone();
    next.extend(catalog.codes_for(resource));
    next
}

/// Revoke every action on `resource` ("clear row").
pub fn revoke_resource(set: &PermissionSet, resource: &str) -> PermissionSet {
    let mut next = set.clone();
    next.retain(|code| code.resource() != resource);
    next
}
