//! The closed registry of resources and actions.
//!
//! The catalog is loaded once per session and is immutable afterwards. It is
//! the source of truth for which [`PermissionCode`]s are grantable and for
//! the canonical display order (catalog resource order, then catalog action
//! order within a resource).
//!
//! A catalog that failed to load must never accept anything. Use
//! [`Catalog::load_or_unavailable`] to get a fail-closed catalog instead of an
//! error when the host would rather keep running.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::code::{PermissionCode, canonical_identifier, is_identifier};
use crate::errors::{PermissionError, Result};
use crate::permissions;

/// An action verb, independent of resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

/// A catalog entry: one resource and the actions that may be granted on it.
///
/// `allowed_actions` is kept deduplicated and in catalog action order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceActionSpec {
    pub resource: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub allowed_actions: Vec<String>,
}

impl ResourceActionSpec {
    pub fn allows(&self, action: &str) -> bool {
        self.allowed_actions.iter().any(|a| a == action)
    }
}

/// Serialized form of a catalog, as consumed from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub version: String,
    pub actions: Vec<ActionSpec>,
    pub resources: Vec<ResourceActionSpec>,
}

#[derive(Debug)]
struct CatalogInner {
    version: String,
    actions: Vec<ActionSpec>,
    resources: Vec<ResourceActionSpec>,
    action_index: HashMap<String, usize>,
    resource_index: HashMap<String, usize>,
    unavailable: Option<String>,
}

/// Read-only permission catalog. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

impl Catalog {
    /// Build a catalog from its parts, validating the document.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidCatalog`] when an identifier is not
    /// canonical, a resource or action is declared twice, or a resource allows
    /// an undeclared action.
    pub fn new(
        version: impl Into<String>,
        actions: Vec<ActionSpec>,
        resources: Vec<ResourceActionSpec>,
    ) -> Result<Self> {
        let mut action_index = HashMap::with_capacity(actions.len());
        let mut canonical_actions = Vec::with_capacity(actions.len());
        for (position, mut action) in actions.into_iter().enumerate() {
            action.key = canonical_identifier(&action.key);
            if !is_identifier(&action.key) {
                return Err(PermissionError::InvalidCatalog(format!(
                    "invalid action key {:?}",
                    action.key
                )));
            }
            if action_index.insert(action.key.clone(), position).is_some() {
                return Err(PermissionError::InvalidCatalog(format!(
                    "duplicate action {:?}",
                    action.key
                )));
            }
            canonical_actions.push(action);
        }

        let mut resource_index = HashMap::with_capacity(resources.len());
        let mut canonical_resources = Vec::with_capacity(resources.len());
        for (position, mut resource) in resources.into_iter().enumerate() {
            resource.resource = canonical_identifier(&resource.resource);
            if !is_identifier(&resource.resource) {
                return Err(PermissionError::InvalidCatalog(format!(
                    "invalid resource key {:?}",
                    resource.resource
                )));
            }

            let mut seen = HashSet::new();
            let mut allowed = Vec::with_capacity(resource.allowed_actions.len());
            for action in &resource.allowed_actions {
                let action = canonical_identifier(action);
                let Some(&order) = action_index.get(&action) else {
                    return Err(PermissionError::InvalidCatalog(format!(
                        "resource {:?} allows undeclared action {:?}",
                        resource.resource, action
                    )));
                };
                if seen.insert(action) {
                    allowed.push(order);
                }
            }
            allowed.sort_unstable();
            resource.allowed_actions = allowed
                .into_iter()
                .map(|order| canonical_actions[order].key.clone())
                .collect();

            if resource_index
                .insert(resource.resource.clone(), position)
                .is_some()
            {
                return Err(PermissionError::InvalidCatalog(format!(
                    "duplicate resource {:?}",
                    resource.resource
                )));
            }
            canonical_resources.push(resource);
        }

        Ok(Self {
            inner: Arc::new(CatalogInner {
                version: version.into(),
                actions: canonical_actions,
                resources: canonical_resources,
                action_index,
                resource_index,
                unavailable: None,
            }),
        })
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        Self::new(document.version, document.actions, document.resources)
    }

    /// Parse a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| PermissionError::InvalidCatalog(e.to_string()))?;
        Self::from_document(document)
    }

    /// Load a JSON catalog document from disk.
    ///
    /// # Errors
    ///
    /// Every failure, including a malformed document, is reported as
    /// [`PermissionError::CatalogUnavailable`].
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PermissionError::CatalogUnavailable(format!("{}: {}", path.display(), e))
        })?;

        let catalog = Self::from_json(&json).map_err(|e| {
            PermissionError::CatalogUnavailable(format!("{}: {}", path.display(), e))
        })?;

        info!(
            catalog.version = %catalog.version(),
            catalog.resources = catalog.resources().len(),
            catalog.actions = catalog.actions().len(),
            "Permission catalog loaded"
        );

        Ok(catalog)
    }

    /// Load a catalog, falling back to a fail-closed catalog on error.
    pub fn load_or_unavailable(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(error = %e, "Permission catalog failed to load; rejecting all permission codes");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// The catalog compiled into [`permissions`].
    pub fn builtin() -> Self {
        let actions = permissions::ACTIONS
            .iter()
            .map(|a| ActionSpec {
                key: a.key.to_string(),
                label: a.label.to_string(),
                description: a.description.to_string(),
            })
            .collect();

        let resources = permissions::RESOURCES
            .iter()
            .map(|r| ResourceActionSpec {
                resource: r.key.to_string(),
                label: r.label.to_string(),
                description: r.description.to_string(),
                allowed_actions: r.actions.iter().map(|a| a.to_string()).collect(),
            })
            .collect();

        match Self::new(permissions::BUILTIN_CATALOG_VERSION, actions, resources) {
            Ok(catalog) => catalog,
            Err(e) => Self::unavailable(e.to_string()),
        }
    }

    /// A fail-closed catalog: it knows nothing and validates nothing.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                version: String::new(),
                actions: Vec::new(),
                resources: Vec::new(),
                action_index: HashMap::new(),
                resource_index: HashMap::new(),
                unavailable: Some(reason.into()),
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.unavailable.is_none()
    }

    pub fn version(&self) -> &str {
        &self.inner.version
    }

    /// All resources, in canonical order.
    pub fn resources(&self) -> &[ResourceActionSpec] {
        &self.inner.resources
    }

    /// All actions, in canonical order.
    pub fn actions(&self) -> &[ActionSpec] {
        &self.inner.actions
    }

    pub fn resource(&self, key: &str) -> Option<&ResourceActionSpec> {
        self.inner
            .resource_index
            .get(key)
            .map(|&i| &self.inner.resources[i])
    }

    pub fn action(&self, key: &str) -> Option<&ActionSpec> {
        self.inner
            .action_index
            .get(key)
            .map(|&i| &self.inner.actions[i])
    }

    pub fn resource_position(&self, key: &str) -> Option<usize> {
        self.inner.resource_index.get(key).copied()
    }

    pub fn action_position(&self, key: &str) -> Option<usize> {
        self.inner.action_index.get(key).copied()
    }

    pub fn is_valid(&self, code: &PermissionCode) -> bool {
        self.check(code).is_ok()
    }

    /// Validate a code against the catalog.
    ///
    /// # Errors
    ///
    /// [`PermissionError::CatalogUnavailable`] on a fail-closed catalog,
    /// otherwise [`PermissionError::InvalidPermissionCode`] when the resource
    /// is unknown or does not allow the action.
    pub fn check(&self, code: &PermissionCode) -> Result<()> {
        if let Some(reason) = &self.inner.unavailable {
            return Err(PermissionError::CatalogUnavailable(reason.clone()));
        }

        match self.resource(code.resource()) {
            Some(spec) if spec.allows(code.action()) => Ok(()),
            _ => Err(PermissionError::invalid_code(code.as_string())),
        }
    }

    /// Compare two codes by catalog position.
    ///
    /// Codes the catalog does not know sort after known ones, lexicographically.
    pub fn canonical_cmp(&self, a: &PermissionCode, b: &PermissionCode) -> Ordering {
        let rank = |code: &PermissionCode| {
            (
                self.resource_position(code.resource()).unwrap_or(usize::MAX),
                self.action_position(code.action()).unwrap_or(usize::MAX),
            )
        };
        rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
    }

    /// Every grantable code of one resource, in canonical order.
    pub fn codes_for(&self, resource: &str) -> Vec<PermissionCode> {
        self.resource(resource)
            .map(|spec| {
                spec.allowed_actions
                    .iter()
                    .filter_map(|action| PermissionCode::new(&spec.resource, action).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every grantable code, in canonical order.
    pub fn all_codes(&self) -> Vec<PermissionCode> {
        self.resources()
            .iter()
            .flat_map(|spec| self.codes_for(&spec.resource))
            .collect()
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            version: self.inner.version.clone(),
            actions: self.inner.actions.clone(),
            resources: self.inner.resources.clone(),
        }
    }
}
