//! # Permatrix CLI
//!
//! The commands behind the `permatrix-cli` binary. Each returns the text to
//! print, so the binary only deals with arguments, output, and exit codes.
//!
//! ## Usage
//!
//! ```
//! use permatrix_cli::commands;
//! use permatrix_core::{BoundaryPolicy, Catalog};
//!
//! let catalog = Catalog::builtin();
//! let out = commands::validate(&catalog, &["member:read".to_string()], BoundaryPolicy::Reject).unwrap();
//! assert!(out.contains("member:read"));
//! ```

pub mod commands;
