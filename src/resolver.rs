//! Applying permission templates to the draft being edited.
//!
//! Templates may have been written against an older catalog. Entries that no
//! longer parse or that the current catalog rejects are *drift*: they are
//! dropped from the result, reported back to the caller, logged, and counted.
//! Drift never fails an apply.
//!
//! # Example
//!
//! ```
//! use permatrix::resolver::{ApplyMode, TemplateResolver};
//! use permatrix_core::Catalog;
//! use permatrix_models::{PermissionDraft, PermissionTemplate, TemplateId};
//!
//! let catalog = Catalog::builtin();
//! let template = PermissionTemplate::new(
//!     TemplateId::from_u128(1),
//!     "Teller",
//!     None,
//!     vec!["member:read".into(), "ghost:read".into()],
//! );
//!
//! let resolution = TemplateResolver::new(&catalog).apply(
//!     &template,
//!     ApplyMode::Replace,
//!     &PermissionDraft::default(),
//! );
//! assert_eq!(resolution.draft.name, "Teller");
//! assert_eq!(resolution.drift, vec!["ghost:read"]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use permatrix_core::{Catalog, PermissionCode, PermissionSet, algebra};
use permatrix_models::{PermissionDraft, PermissionTemplate, TemplateId};
use permatrix_observability::track_dropped_codes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a template combines with the current draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// Name, description, and permissions all come from the template.
    #[default]
    Replace,
    /// The template's permissions are added to the current ones; name and
    /// description are kept.
    Merge,
}

impl ApplyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplyMode::Replace => "replace",
            ApplyMode::Merge => "merge",
        }
    }
}

impl fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplyMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(ApplyMode::Replace),
            "merge" => Ok(ApplyMode::Merge),
            other => Err(format!("unknown apply mode: {other}")),
        }
    }
}

/// The draft after applying a template, and the template entries dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResolution {
    pub draft: PermissionDraft,
    /// Raw entries from the template that did not survive, in template order.
    pub drift: Vec<String>,
}

impl TemplateResolution {
    pub fn has_drift(&self) -> bool {
        !self.drift.is_empty()
    }
}

/// Drift found in one template by [`TemplateResolver::drift_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDrift {
    pub template_id: TemplateId,
    pub name: String,
    pub drift: Vec<String>,
}

/// Resolves templates against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The template's permissions that are valid today, plus its drift.
    ///
    /// On a fail-closed catalog every entry is drift.
    pub fn resolve(&self, template: &PermissionTemplate) -> (PermissionSet, Vec<String>) {
        let mut kept = Vec::new();
        let mut drift = Vec::new();
        let mut seen = HashSet::new();

        for raw in &template.permissions {
            match PermissionCode::parse(raw) {
                Ok(code) if self.catalog.is_valid(&code) => kept.push(code),
                Ok(code) => {
                    let entry = code.as_string();
                    if seen.insert(entry.clone()) {
                        drift.push(entry);
                    }
                }
                Err(_) => {
                    let entry = raw.trim().to_string();
                    if seen.insert(entry.clone()) {
                        drift.push(entry);
                    }
                }
            }
        }

        if !drift.is_empty() {
            warn!(
                template_id = %template.id,
                template = %template.name,
                catalog_version = %self.catalog.version(),
                drift = %drift.join(", "),
                "Template references permissions outside the catalog"
            );
            track_dropped_codes("template", drift.len());
        }

        (kept.into_iter().collect(), drift)
    }

    /// Apply `template` to `current` in the given mode.
    pub fn apply(
        &self,
        template: &PermissionTemplate,
        mode: ApplyMode,
        current: &PermissionDraft,
    ) -> TemplateResolution {
        let (permissions, drift) = self.resolve(template);

        let draft = match mode {
            ApplyMode::Replace => PermissionDraft {
                name: template.name.clone(),
                description: template.description.clone(),
                permissions,
            },
            ApplyMode::Merge => PermissionDraft {
                permissions: algebra::union(&current.permissions, &permissions),
                ..current.clone()
            },
        };

        debug!(
            template_id = %template.id,
            mode = %mode,
            granted = draft.permissions.len(),
            "Template applied"
        );

        TemplateResolution { draft, drift }
    }

    /// Templates carrying drift against the catalog, in input order.
    pub fn drift_report(&self, templates: &[PermissionTemplate]) -> Vec<TemplateDrift> {
        templates
            .iter()
            .filter_map(|template| {
                let (_, drift) = self.resolve(template);
                (!drift.is_empty()).then(|| TemplateDrift {
                    template_id: template.id,
                    name: template.name.clone(),
                    drift,
                })
            })
            .collect()
    }
}
