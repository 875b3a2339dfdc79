//! Catalog source and persistence boundary configuration.
//!
//! # Configuration
//!
//! - `PERMATRIX_CATALOG_PATH`: JSON catalog document to load (default: built-in catalog)
//! - `PERMATRIX_BOUNDARY_POLICY`: `reject` or `strip` (default: `reject`)

use std::path::PathBuf;

use permatrix_core::{BoundaryPolicy, Catalog};

use crate::env_or;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog document on disk. `None` selects the built-in catalog.
    pub path: Option<PathBuf>,

    /// What the wire boundary does with codes the catalog rejects.
    pub boundary_policy: BoundaryPolicy,
}

impl CatalogConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            path: std::env::var("PERMATRIX_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            boundary_policy: env_or("PERMATRIX_BOUNDARY_POLICY", BoundaryPolicy::default()),
        }
    }

    /// Load the configured catalog.
    ///
    /// A configured path that cannot be loaded yields a fail-closed catalog
    /// rather than falling back to the built-in one.
    pub fn load_catalog(&self) -> Catalog {
        match &self.path {
            Some(path) => Catalog::load_or_unavailable(path),
            None => Catalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.path, None);
        assert_eq!(config.boundary_policy, BoundaryPolicy::Reject);
    }

    #[test]
    fn default_config_loads_builtin_catalog() {
        let catalog = CatalogConfig::default().load_catalog();
        assert!(catalog.is_available());
    }

    #[test]
    fn missing_catalog_file_fails_closed() {
        let config = CatalogConfig {
            path: Some(PathBuf::from("/nonexistent/permatrix-catalog.json")),
            boundary_policy: BoundaryPolicy::Strip,
        };
        assert!(!config.load_catalog().is_available());
    }
}
