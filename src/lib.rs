//! # Permatrix
//!
//! Permission modelling for an organization's access-control screens: a
//! versioned catalog of resources and actions, pure algebra over permission
//! sets, the grouped matrix view, reusable templates, and fuzzy search with
//! debounced queries.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── permatrix-core/           # Catalog, codes, sets, algebra, codec, wire boundary
//! ├── permatrix-models/         # Templates, drafts, typed ids
//! ├── permatrix-search/         # Edit-distance scorer, search index, debouncer
//! ├── permatrix-config/         # Environment-driven configuration
//! ├── permatrix-observability/  # Logging setup and counters
//! └── permatrix-cli/            # Command-line host
//! src/
//! ├── resolver.rs               # Applying templates (replace / merge, drift)
//! ├── editor.rs                 # Editing session with undo and submit
//! ├── matrix.rs                 # Matrix rows and the read-only viewer
//! └── errors.rs                 # Session errors
//! ```
//!
//! ## Data flow
//!
//! Stored permissions enter through [`permatrix_core::wire::parse`], are edited
//! as a [`PermissionSet`] by value, displayed through the grouped view or
//! [`matrix`], and leave again through [`PermissionEditor::submit`]. The
//! catalog is loaded once and shared read-only.
//!
//! ## Configuration
//!
//! See `permatrix-config`:
//!
//! - `PERMATRIX_CATALOG_PATH`: catalog JSON file (built-in catalog otherwise)
//! - `PERMATRIX_BOUNDARY_POLICY`: `reject` (default) or `strip`
//! - `PERMATRIX_SEARCH_THRESHOLD`: default `0.3`
//! - `PERMATRIX_DEBOUNCE_MS`: default `300`
//! - `LOG_LEVEL` / `LOG_FORMAT`: logging
//!
//! ## Example
//!
//! ```
//! use permatrix::{ApplyMode, PermissionEditor};
//! use permatrix_core::{BoundaryPolicy, Catalog};
//! use permatrix_models::{PermissionDraft, PermissionTemplate, TemplateId};
//!
//! let template = PermissionTemplate::new(
//!     TemplateId::from_u128(1),
//!     "Viewer",
//!     None,
//!     vec!["member:read".into(), "report:read".into()],
//! );
//!
//! let mut editor = PermissionEditor::new(
//!     Catalog::builtin(),
//!     PermissionDraft::default(),
//!     BoundaryPolicy::default(),
//! );
//! let drift = editor.apply_template(&template, ApplyMode::Replace);
//! assert!(drift.is_empty());
//! assert_eq!(editor.submit().unwrap().permissions, vec!["member:read", "report:read"]);
//! ```

pub mod editor;
pub mod errors;
pub mod matrix;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use editor::PermissionEditor;
pub use errors::EditorError;
pub use matrix::{MatrixCell, MatrixMode, MatrixRow};
pub use resolver::{ApplyMode, TemplateDrift, TemplateResolution, TemplateResolver};

pub use permatrix_core::PermissionSet;
