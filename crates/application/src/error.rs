//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::{ItemStoreError, MailerError};

/// Errors surfaced by email lifecycle operations
///
/// Callers map these onto their own status codes; no user-facing text is
/// produced here.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Malformed or missing required input; nothing was persisted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The record's current persisted kind is not `draft`
    #[error("Email is not a draft: {id}")]
    EmailIsNotDraft { id: String },

    /// The expected draft no longer exists in the expected form
    #[error("Email record not found: {id}")]
    RecordNotFound { id: String },

    /// The delivery provider rejected or errored; the draft is untouched
    #[error("Send failed: {0}")]
    SendFailed(#[source] MailerError),

    /// Any other persistence-layer failure
    #[error("Storage failure: {0}")]
    Storage(#[source] ItemStoreError),
}

impl EmailError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a not-a-draft error
    pub fn not_draft(id: impl Into<String>) -> Self {
        Self::EmailIsNotDraft { id: id.into() }
    }

    /// Create a record-not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Whether retrying the same call can succeed without caller-side repair
    ///
    /// Only send failures qualify: the draft is untouched and the provider
    /// may accept on the next attempt.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SendFailed(_))
    }
}

impl From<DomainError> for EmailError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(message) => Self::InvalidInput(message),
            DomainError::InvalidTextPolicy(policy) => {
                Self::InvalidInput(format!("invalid text policy: {policy}"))
            },
            DomainError::MalformedItem { attribute, reason } => {
                Self::Storage(ItemStoreError::Malformed(format!("{attribute}: {reason}")))
            },
        }
    }
}
