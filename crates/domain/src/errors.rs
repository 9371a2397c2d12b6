//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A caller-supplied field failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognized text-generation policy value
    #[error("Invalid text policy: {0}")]
    InvalidTextPolicy(String),

    /// A stored item is missing an attribute or carries one of the wrong type
    #[error("Malformed item attribute {attribute}: {reason}")]
    MalformedItem { attribute: String, reason: String },
}

impl DomainError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a malformed item error
    pub fn malformed_item(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedItem {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}
