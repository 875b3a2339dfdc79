//! # Permatrix Core
//!
//! The permission model: codes, the catalog, sets, and conversions.
//!
//! - [`code`]: the canonical `resource:action` [`PermissionCode`]
//! - [`catalog`]: the closed registry of resources and actions
//! - [`permissions`]: built-in catalog definitions and code constants
//! - [`set`]: deduplicated [`PermissionSet`]s
//! - [`algebra`]: pure grant/revoke/toggle/union/validate operations
//! - [`codec`]: flat set ⇄ resource-grouped view
//! - [`wire`]: parsing and rendering at the persistence boundary
//! - [`errors`]: the [`PermissionError`] type
//!
//! # Example
//!
//! ```
//! use permatrix_core::{Catalog, PermissionCode, PermissionSet, algebra, codec};
//!
//! let catalog = Catalog::builtin();
//! let code = PermissionCode::parse("member:read").unwrap();
//!
//! let set = algebra::grant(&catalog, &PermissionSet::new(), &code).unwrap();
//! let grouped = codec::to_grouped(&catalog, &set);
//! assert!(grouped.view.is_granted("member", "read"));
//! assert_eq!(codec::to_flat(&grouped.view), set);
//! ```

pub mod algebra;
pub mod catalog;
pub mod code;
pub mod codec;
pub mod errors;
pub mod permissions;
pub mod serde;
pub mod set;
pub mod wire;

// Re-export commonly used types at crate root
pub use algebra::Validation;
pub use catalog::{ActionSpec, Catalog, CatalogDocument, ResourceActionSpec};
pub use code::PermissionCode;
pub use codec::{Grouped, GroupedPermissionView};
pub use errors::{PermissionError, Result};
pub use set::PermissionSet;
pub use wire::{BoundaryPolicy, ParsedSet};
