//! The two searchable corpora: catalog entries and permission templates.

use std::borrow::Cow;

use permatrix_core::{ActionSpec, Catalog, ResourceActionSpec};
use permatrix_models::PermissionTemplate;

use crate::index::{SearchField, Searchable};

/// Field names exposed by [`CatalogEntry`].
pub mod catalog_fields {
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const RESOURCE: &str = "resource";
    /// Labels and descriptions of the resource's allowed actions, joined.
    pub const ACTIONS: &str = "actions";
}

/// Field names exposed by [`PermissionTemplate`].
pub mod template_fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
}

/// One catalog resource together with its allowed actions' metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub resource: ResourceActionSpec,
    pub actions: Vec<ActionSpec>,
    actions_text: String,
}

impl CatalogEntry {
    pub fn new(resource: ResourceActionSpec, actions: Vec<ActionSpec>) -> Self {
        let actions_text = actions
            .iter()
            .map(|a| format!("{} {}", a.label, a.description))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            resource,
            actions,
            actions_text,
        }
    }

    /// Every catalog resource as an entry, in canonical order.
    pub fn from_catalog(catalog: &Catalog) -> Vec<Self> {
        catalog
            .resources()
            .iter()
            .map(|spec| {
                let actions = spec
                    .allowed_actions
                    .iter()
                    .filter_map(|key| catalog.action(key).cloned())
                    .collect();
                Self::new(spec.clone(), actions)
            })
            .collect()
    }

    /// Label first, then resource key, description, and action text.
    pub fn default_fields() -> Vec<SearchField> {
        vec![
            SearchField::new(catalog_fields::LABEL),
            SearchField::new(catalog_fields::RESOURCE).weighted(0.9),
            SearchField::new(catalog_fields::DESCRIPTION).weighted(0.7),
            SearchField::new(catalog_fields::ACTIONS).weighted(0.5),
        ]
    }
}

impl Searchable for CatalogEntry {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            catalog_fields::LABEL => Some(Cow::Borrowed(&self.resource.label)),
            catalog_fields::DESCRIPTION => Some(Cow::Borrowed(&self.resource.description)),
            catalog_fields::RESOURCE => Some(Cow::Owned(self.resource.resource.replace('_', " "))),
            catalog_fields::ACTIONS => Some(Cow::Borrowed(&self.actions_text)),
            _ => None,
        }
    }
}

/// Name first, then description.
pub fn default_template_fields() -> Vec<SearchField> {
    vec![
        SearchField::new(template_fields::NAME),
        SearchField::new(template_fields::DESCRIPTION).weighted(0.6),
    ]
}

impl Searchable for PermissionTemplate {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            template_fields::NAME => Some(Cow::Borrowed(&self.name)),
            template_fields::DESCRIPTION => self.description.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}
