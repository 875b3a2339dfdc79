//! # Permatrix Search
//!
//! Approximate search over the permission catalog and permission templates.
//!
//! - [`scorer`]: edit-distance scoring of query tokens against text
//! - [`index`]: weighted, thresholded ranking and the rebuildable [`SearchIndex`]
//! - [`corpus`]: searchable catalog entries and templates
//! - [`debounce`]: coalescing of rapid query input
//!
//! # Example
//!
//! ```
//! use permatrix_core::Catalog;
//! use permatrix_search::{CatalogEntry, SearchIndex};
//!
//! let catalog = Catalog::builtin();
//! let index = SearchIndex::new(CatalogEntry::from_catalog(&catalog), CatalogEntry::default_fields());
//!
//! let hits = index.search("membrs", 0.3);
//! assert_eq!(hits[0].item.resource.resource, "member");
//! ```

pub mod corpus;
pub mod debounce;
pub mod index;
pub mod scorer;

pub use corpus::{CatalogEntry, default_template_fields};
pub use debounce::QueryDebouncer;
pub use index::{DEFAULT_THRESHOLD, ScoredItem, SearchField, SearchIndex, Searchable, search};
