//! The permission matrix: one row per catalog resource, one column per
//! catalog action.
//!
//! Cells for actions a resource does not allow are present but disabled, so
//! every row lines up with the column headers. The read-only viewer uses
//! [`MatrixMode::View`], which keeps only rows with something granted.

use permatrix_core::{ActionSpec, Catalog, PermissionCode, PermissionSet};
use permatrix_observability::track_search;
use permatrix_search::{CatalogEntry, SearchIndex};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatrixMode {
    /// Every catalog resource.
    #[default]
    Edit,
    /// Only resources with at least one granted action.
    View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub action: String,
    /// Whether the resource allows this action at all.
    pub allowed: bool,
    pub granted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub resource: String,
    pub label: String,
    pub description: String,
    pub cells: Vec<MatrixCell>,
}

impl MatrixRow {
    pub fn granted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.granted).count()
    }

    pub fn allowed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.allowed).count()
    }

    /// Every allowed action is granted ("row selected").
    pub fn is_fully_granted(&self) -> bool {
        self.allowed_count() > 0 && self.granted_count() == self.allowed_count()
    }

    pub fn cell(&self, action: &str) -> Option<&MatrixCell> {
        self.cells.iter().find(|c| c.action == action)
    }
}

/// Column headers, in catalog action order.
pub fn columns(catalog: &Catalog) -> &[ActionSpec] {
    catalog.actions()
}

/// Lay `set` out against the catalog.
///
/// Codes the catalog does not know cannot be placed and are ignored here;
/// they surface through [`permatrix_core::codec::to_grouped`] instead.
pub fn build(catalog: &Catalog, set: &PermissionSet, mode: MatrixMode) -> Vec<MatrixRow> {
    catalog
        .resources()
        .iter()
        .map(|spec| MatrixRow {
            resource: spec.resource.clone(),
            label: spec.label.clone(),
            description: spec.description.clone(),
            cells: catalog
                .actions()
                .iter()
                .map(|action| {
                    let allowed = spec.allows(&action.key);
                    let granted = allowed
                        && PermissionCode::new(&spec.resource, &action.key)
                            .is_ok_and(|code| set.contains(&code));
                    MatrixCell {
                        action: action.key.clone(),
                        allowed,
                        granted,
                    }
                })
                .collect(),
        })
        .filter(|row| mode == MatrixMode::Edit || row.granted_count() > 0)
        .collect()
}

/// Rows matching `query`, best match first.
///
/// An empty query keeps every row in its original order.
pub fn filter_rows<'r>(
    catalog: &Catalog,
    rows: &'r [MatrixRow],
    query: &str,
    threshold: f64,
) -> Vec<&'r MatrixRow> {
    let index = SearchIndex::new(CatalogEntry::from_catalog(catalog), CatalogEntry::default_fields());
    let hits = index.search(query, threshold);
    track_search("catalog", hits.len());

    hits.iter()
        .filter_map(|hit| {
            rows.iter()
                .find(|row| row.resource == hit.item.resource.resource)
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
    fn edit_mode_has_every_resource_and_column() {
        let catalog = Catalog::builtin();
        let rows = build(&catalog, &PermissionSet::new(), MatrixMode::Edit);

        assert_eq!(rows.len(), catalog.resources().len());
        assert!(rows.iter().all(|r| r.cells.len() == columns(&catalog).len()));
        assert!(rows.iter().all(|r| r.granted_count() == 0));
    }

    #[test]
    fn disallowed_cells_are_never_granted() {
        let catalog = Catalog::builtin();
        let rows = build(&catalog, &set(&["member:read", "member:approve"]), MatrixMode::Edit);
        let member = rows.iter().find(|r| r.resource == "member").unwrap();

        assert!(member.cell("read").is_some_and(|c| c.allowed && c.granted));
        assert!(member.cell("approve").is_some_and(|c| !c.allowed && !c.granted));
        assert_eq!(member.granted_count(), 1);
    }

    #[test]
    fn view_mode_hides_empty_rows() {
        let catalog = Catalog::builtin();
        let rows = build(&catalog, &set(&["report:read", "member:read"]), MatrixMode::View);
        let resources: Vec<&str> = rows.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(resources, vec!["member", "report"]);
    }

    #[test]
    fn full_row_is_detected() {
        let catalog = Catalog::builtin();
        let all_reports = PermissionSet::from_iter(catalog.codes_for("report"));
        let rows = build(&catalog, &all_reports, MatrixMode::View);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_fully_granted());
    }

    #[test]
    fn filtering_rows_ranks_by_match() {
        let catalog = Catalog::builtin();
        let rows = build(&catalog, &PermissionSet::new(), MatrixMode::Edit);

        let hits = filter_rows(&catalog, &rows, "acounts", 0.3);
        assert_eq!(hits.first().map(|r| r.resource.as_str()), Some("account"));

        let everything = filter_rows(&catalog, &rows, "", 0.3);
        assert_eq!(everything.len(), rows.len());
    }

    #[test]
    fn filtering_view_rows_skips_hidden_resources() {
        let catalog = Catalog::builtin();
        let rows = build(&catalog, &set(&["report:read"]), MatrixMode::View);
        assert!(filter_rows(&catalog, &rows, "member", 0.3).is_empty());
    }
}
