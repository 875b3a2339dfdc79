//! Fixtures shared by unit and integration tests.
//!
//! Compiled for this crate's tests, and for dependents with the `test-utils`
//! feature.

use permatrix_core::{Catalog, PermissionSet};
use permatrix_models::{PermissionTemplate, TemplateId};

pub const ADMIN_TEMPLATE: TemplateId = TemplateId::from_u128(1);
pub const EDITOR_TEMPLATE: TemplateId = TemplateId::from_u128(2);
pub const VIEWER_TEMPLATE: TemplateId = TemplateId::from_u128(3);

/// A small catalog: `member` allows `read` and `update`, `account` allows
/// `create` and `read`.
pub const SMALL_CATALOG_JSON: &str = r#"{
    "version": "test-1",
    "actions": [
        {"key": "create", "label": "Create", "description": "Add new records"},
        {"key": "read", "label": "View", "description": "View and list records"},
        {"key": "update", "label": "Edit", "description": "Modify existing records"},
        {"key": "delete", "label": "Delete", "description": "Permanently remove records"}
    ],
    "resources": [
        {"resource": "member", "label": "Members", "description": "Member records", "allowed_actions": ["read", "update"]},
        {"resource": "account", "label": "Accounts", "description": "Member accounts", "allowed_actions": ["create", "read"]}
    ]
}"#;

pub fn small_catalog() -> Catalog {
    Catalog::from_json(SMALL_CATALOG_JSON).expect("fixture catalog is valid")
}

/// Parse `raw` into a set; panics on malformed codes.
pub fn set(raw: &[&str]) -> PermissionSet {
    PermissionSet::parse(raw).expect("fixture codes are well formed")
}

pub fn template(id: TemplateId, name: &str, description: Option<&str>, permissions: &[&str]) -> PermissionTemplate {
    PermissionTemplate::new(
        id,
        name,
        description.map(str::to_string),
        permissions.iter().map(|p| p.to_string()).collect(),
    )
}

/// Admin, Editor, and Viewer, valid against the built-in catalog.
pub fn sample_templates() -> Vec<PermissionTemplate> {
    vec![
        template(
            ADMIN_TEMPLATE,
            "Admin",
            Some("Full control of the organization"),
            &[
                "organization:read",
                "organization:update",
                "member:create",
                "member:read",
                "member:update",
                "member:delete",
                "report:read",
                "report:export",
            ],
        ),
        template(
            EDITOR_TEMPLATE,
            "Editor",
            Some("Can change member and account records"),
            &["member:read", "member:update", "account:read", "account:update"],
        ),
        template(
            VIEWER_TEMPLATE,
            "Viewer",
            Some("Read only access"),
            &["member:read", "account:read", "report:read"],
        ),
    ]
}
