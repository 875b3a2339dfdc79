use permatrix_core::PermissionError;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors surfaced by an editing session.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The draft's name or description failed validation.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Permission(#[from] PermissionError),
}

impl From<ValidationErrors> for EditorError {
    fn from(errors: ValidationErrors) -> Self {
        EditorError::Validation(format_errors(&errors))
    }
}

/// Flatten field errors into one message, using each rule's message when set.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EditorError>;
