//! # Permatrix Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`catalog`]: where the permission catalog comes from and the boundary policy
//! - [`search`]: fuzzy search threshold and debounce window
//!
//! # Example
//!
//! ```
//! use permatrix_config::{CatalogConfig, SearchConfig};
//!
//! let catalog_config = CatalogConfig::from_env();
//! let search_config = SearchConfig::from_env();
//! assert!((0.0..=1.0).contains(&search_config.threshold));
//! ```

pub mod catalog;
pub mod search;

pub use catalog::CatalogConfig;
pub use search::SearchConfig;

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(variable = name, value = %raw, "Ignoring unparsable environment variable");
                default
            }
        },
        Err(_) => default,
    }
}
