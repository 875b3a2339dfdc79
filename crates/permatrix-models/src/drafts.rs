//! The editing form's state and its submission payload.

use permatrix_core::serde::deserialize_optional_string;
use permatrix_core::{Catalog, PermissionSet, wire};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name, description, and permissions being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PermissionDraft {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl PermissionDraft {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            permissions: PermissionSet::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    /// Wire payload for the persistence boundary.
    pub fn to_submission(&self, catalog: &Catalog) -> PermissionSubmission {
        PermissionSubmission {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            permissions: wire::to_wire(catalog, &self.permissions),
        }
    }
}

/// What the host persists when the user submits the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSubmission {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        let valid = PermissionDraft::new("Teller", Some("Front desk".into()));
        assert!(valid.validate().is_ok());

        let empty_name = PermissionDraft::new("", None);
        assert!(empty_name.validate().is_err());

        let long_description = PermissionDraft::new("Teller", Some("x".repeat(501)));
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn empty_permission_set_is_valid_draft() {
        let draft = PermissionDraft::new("Nobody", None);
        assert!(draft.validate().is_ok());
        assert!(draft.permissions.is_empty());
    }

    #[test]
    fn submission_uses_canonical_wire_order() {
        let catalog = Catalog::builtin();
        let draft = PermissionDraft::new(" Teller ", None).with_permissions(
            PermissionSet::parse(["account:read", "member:update", "member:read"]).unwrap(),
        );
        let submission = draft.to_submission(&catalog);
        assert_eq!(submission.name, "Teller");
        assert_eq!(
            submission.permissions,
            vec!["member:read", "member:update", "account:read"]
        );
    }

    #[test]
    fn deserializes_draft_from_json() {
        let json = r#"{"name":"Auditor","description":" ","permissions":["report:read","report:read"]}"#;
        let draft: PermissionDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.description, None);
        assert_eq!(draft.permissions.len(), 1);
    }
}
