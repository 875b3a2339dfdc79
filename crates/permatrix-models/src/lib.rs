//! # Permatrix Models
//!
//! Data structures exchanged with the host application.
//!
//! - [`ids`]: strongly typed identifiers
//! - [`templates`]: read-only permission templates
//! - [`drafts`]: the permission form being edited and its submission payload

pub mod drafts;
pub mod ids;
pub mod templates;

pub use drafts::{PermissionDraft, PermissionSubmission};
pub use ids::TemplateId;
pub use templates::{PermissionTemplate, find_template, generate_slug};
