//! Conversion between flat permission sets and the resource-grouped view.
//!
//! The grouped view is what a permission matrix edits: one row per resource,
//! one checkbox per action. It is derived from a [`PermissionSet`] and never
//! stored. For every valid set `s`, `to_flat(&to_grouped(catalog, &s).view)`
//! equals `s`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::code::PermissionCode;
use crate::set::PermissionSet;

/// Resource → granted actions. Resources with no granted action are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedPermissionView {
    resources: BTreeMap<String, BTreeSet<String>>,
}

impl GroupedPermissionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resources with at least one granted action.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn actions(&self, resource: &str) -> Option<&BTreeSet<String>> {
        self.resources.get(resource)
    }

    pub fn is_granted(&self, resource: &str, action: &str) -> bool {
        self.resources
            .get(resource)
            .is_some_and(|actions| actions.contains(action))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.resources.iter().map(|(r, a)| (r.as_str(), a))
    }

    fn add(&mut self, code: &PermissionCode) {
        self.resources
            .entry(code.resource().to_string())
            .or_default()
            .insert(code.action().to_string());
    }
}

/// Result of [`to_grouped`]: the view plus the codes left out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouped {
    pub view: GroupedPermissionView,
    pub dropped: Vec<PermissionCode>,
}

/// Group `set` by resource, dropping codes the catalog rejects.
pub fn to_grouped(catalog: &Catalog, set: &PermissionSet) -> Grouped {
    let mut grouped = Grouped::default();

    for code in set {
        if catalog.is_valid(code) {
            grouped.view.add(code);
        } else {
            warn!(permission = %code, "Dropping invalid permission from grouped view");
            grouped.dropped.push(code.clone());
        }
    }

    grouped
}

/// Flatten a grouped view back into a set.
///
/// Entries that cannot form a code (only possible for views deserialized from
/// untrusted input) are skipped.
pub fn to_flat(view: &GroupedPermissionView) -> PermissionSet {
    view.resources
        .iter()
        .flat_map(|(resource, actions)| {
            actions
                .iter()
                .filter_map(move |action| PermissionCode::new(resource, action).ok())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(raw: &[&str]) -> PermissionSet {
        PermissionSet::parse(raw).unwrap()
    }

    #[test]
    fn groups_actions_by_resource() {
        let catalog = Catalog::builtin();
        let grouped = to_grouped(&catalog, &set(&["member:read", "member:update", "account:create"]));

        assert!(grouped.dropped.is_empty());
        assert_eq!(grouped.view.len(), 2);
        assert!(grouped.view.is_granted("member", "read"));
        assert!(grouped.view.is_granted("member", "update"));
        assert!(grouped.view.is_granted("account", "create"));
        assert!(!grouped.view.is_granted("account", "read"));
        assert!(grouped.view.actions("report").is_none());
    }

    #[test]
    fn roundtrip_restores_valid_set() {
        let catalog = Catalog::builtin();
        let all = PermissionSet::from_iter(catalog.all_codes());
        for s in [
            PermissionSet::new(),
            set(&["member:read"]),
            set(&["transaction:approve", "report:export", "organization:update"]),
            all,
        ] {
            assert_eq!(to_flat(&to_grouped(&catalog, &s).view), s);
        }
    }

    #[test]
    fn empty_set_groups_to_empty_view() {
        let catalog = Catalog::builtin();
        let grouped = to_grouped(&catalog, &PermissionSet::new());
        assert!(grouped.view.is_empty());
        assert!(to_flat(&grouped.view).is_empty());
    }

    #[test]
    fn invalid_codes_are_dropped_not_bucketed() {
        let catalog = Catalog::builtin();
        let grouped = to_grouped(&catalog, &set(&["member:read", "member:approve", "ghost:read"]));

        assert_eq!(grouped.view.actions("member").map(|a| a.len()), Some(1));
        assert!(grouped.view.actions("ghost").is_none());
        assert_eq!(grouped.dropped.len(), 2);
    }

    #[test]
    fn grouping_is_deterministic() {
        let catalog = Catalog::builtin();
        let s = set(&["report:read", "member:read", "account:update"]);
        assert_eq!(to_grouped(&catalog, &s), to_grouped(&catalog, &s));
    }

    #[test]
    fn view_serializes_as_map() {
        let catalog = Catalog::builtin();
        let grouped = to_grouped(&catalog, &set(&["member:update", "member:read"]));
        let json = serde_json::to_string(&grouped.view).unwrap();
        assert_eq!(json, r#"{"member":["read","update"]}"#);
    }
}
