//! Permission template models.
//!
//! Templates are read-only data fetched by the host. Their permissions are
//! kept in raw wire form because a template may predate the current catalog;
//! drift is detected when the template is applied.

use permatrix_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};

use crate::ids::TemplateId;

/// Generate a slug from a name
/// Converts to lowercase, replaces spaces and hyphens with underscores,
/// removes invalid characters, and ensures it starts with a letter
pub fn generate_slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Collapse runs of underscores and drop leading ones
    let mut result = String::new();
    let mut prev_underscore = false;
    for c in slug.chars() {
        if c == '_' {
            if !prev_underscore && !result.is_empty() {
                result.push(c);
            }
            prev_underscore = true;
        } else {
            result.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = result.trim_end_matches('_');
    match trimmed.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("t_{}", trimmed),
        _ => trimmed.to_string(),
    }
}

/// A named, reusable set of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    /// Wire entries (`resource:action`), possibly drifted.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl PermissionTemplate {
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        description: Option<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            permissions,
        }
    }

    pub fn slug(&self) -> String {
        generate_slug(&self.name)
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Parse a JSON array of templates.
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(json)
    }
}

/// Find a template by id or by name slug.
pub fn find_template<'a>(
    templates: &'a [PermissionTemplate],
    key: &str,
) -> Option<&'a PermissionTemplate> {
    let key = key.trim();
    if let Ok(id) = key.parse::<TemplateId>() {
        return templates.iter().find(|t| t.id == id);
    }

    let slug = generate_slug(key);
    templates.iter().find(|t| t.slug() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: u128, name: &str) -> PermissionTemplate {
        PermissionTemplate::new(
            TemplateId::from_u128(id),
            name,
            None,
            vec!["member:read".to_string()],
        )
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Branch Manager"), "branch_manager");
        assert_eq!(generate_slug("Read-Only"), "read_only");
        assert_eq!(generate_slug("Teller  (Senior)"), "teller_senior");
        assert_eq!(generate_slug("2nd Approver"), "t_2nd_approver");
    }

    #[test]
    fn deserializes_blank_description_as_none() {
        let json = r#"[{"id":"00000000-0000-0000-0000-000000000001","name":"Admin","description":"","permissions":["member:read"]}]"#;
        let templates = PermissionTemplate::list_from_json(json).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].description, None);
        assert_eq!(templates[0].description_or_empty(), "");
    }

    #[test]
    fn missing_permissions_default_to_empty() {
        let json = r#"{"id":"00000000-0000-0000-0000-000000000002","name":"Empty"}"#;
        let template: PermissionTemplate = serde_json::from_str(json).unwrap();
        assert!(template.permissions.is_empty());
    }

    #[test]
    fn find_by_id_or_slug() {
        let templates = vec![template(1, "Branch Manager"), template(2, "Teller")];

        let by_id = find_template(&templates, "00000000-0000-0000-0000-000000000002");
        assert_eq!(by_id.map(|t| t.name.as_str()), Some("Teller"));

        let by_slug = find_template(&templates, "branch manager");
        assert_eq!(by_slug.map(|t| t.name.as_str()), Some("Branch Manager"));

        assert!(find_template(&templates, "auditor").is_none());
    }
}
