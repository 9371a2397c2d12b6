//! Outbound delivery port
//!
//! Defines the interface to the external send API. The provider assigns the
//! definitive message identifier only after it has accepted the message;
//! that identifier becomes the key of the sent record.

use async_trait::async_trait;
use domain::{EmailRecord, MessageId};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The provider refused the message
    #[error("Delivery rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached or timed out
    #[error("Delivery provider unreachable: {0}")]
    Unreachable(String),

    /// The provider's response could not be interpreted
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Port for dispatching email through the delivery provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MailerPort: Send + Sync {
    /// Dispatch the record's envelope and bodies
    ///
    /// Returns the provider-assigned identifier on acceptance. The caller
    /// must treat any error as "nothing was sent" and leave its own state
    /// untouched.
    async fn send(&self, email: &EmailRecord) -> Result<MessageId, MailerError>;
}
