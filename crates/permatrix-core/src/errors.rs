//! Error types for permission parsing, validation, and catalog loading.

use thiserror::Error;

/// Errors raised by the hard-failing permission operations.
///
/// Only parsing, [`grant`](crate::algebra::grant), wire parsing, and catalog
/// loading return these. Every other operation is total and reports dropped
/// data through logs instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("invalid permission code(s): {}", .codes.join(", "))]
    InvalidPermissionCode { codes: Vec<String> },

    #[error("permission catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("invalid permission catalog: {0}")]
    InvalidCatalog(String),
}

impl PermissionError {
    pub fn invalid_code(code: impl Into<String>) -> Self {
        Self::InvalidPermissionCode {
            codes: vec![code.into()],
        }
    }

    pub fn invalid_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidPermissionCode {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Codes carried by an [`PermissionError::InvalidPermissionCode`] error.
    pub fn rejected_codes(&self) -> &[String] {
        match self {
            Self::InvalidPermissionCode { codes } => codes,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, PermissionError>;
