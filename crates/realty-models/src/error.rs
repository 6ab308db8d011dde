use rust_decimal::Decimal;
use thiserror::Error;

/// Raised when an entity is constructed from a value of the wrong semantic type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be a non-empty string")]
    EmptyField(&'static str),

    #[error("area must be a positive number, got {0}")]
    NonPositiveArea(Decimal),

    #[error("number of rooms must be a positive integer")]
    NoRooms,
}

/// Reject empty or whitespace-only text fields.
pub(crate) fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}
