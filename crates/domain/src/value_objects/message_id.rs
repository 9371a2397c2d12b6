//! Primary key for records in the mail store

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Prefix carried by generated draft identifiers
pub const DRAFT_ID_PREFIX: &str = "draft-";

/// A record's primary key
///
/// Drafts carry a caller- or system-generated identifier. Sent records carry
/// the identifier assigned by the delivery provider on acceptance, so a
/// `MessageId` is an opaque non-empty string rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Create a message ID from an existing string
    ///
    /// # Errors
    /// Returns an error if the string is empty
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::invalid_input("message ID must not be empty"));
        }
        Ok(Self(id))
    }

    /// Generate a fresh draft identifier
    pub fn generate_draft() -> Self {
        Self(format!("{DRAFT_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

impl TryFrom<String> for MessageId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
