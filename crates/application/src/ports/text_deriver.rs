//! Plain-text derivation port
//!
//! The conversion algorithm itself lives behind this seam; the application
//! layer only decides when to invoke it, driven by the caller's
//! [`domain::TextPolicy`].

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Text derivation errors
#[derive(Debug, Error)]
pub enum TextDeriverError {
    /// The HTML body could not be converted
    #[error("Cannot derive text from HTML: {0}")]
    Unconvertible(String),
}

/// Port for deriving a plain-text body from an HTML body
///
/// Implementations are pure functions over their input and must not perform
/// I/O.
#[cfg_attr(test, automock)]
pub trait TextDeriverPort: Send + Sync {
    /// Derive a plain-text rendering of `html`
    fn derive_text(&self, html: &str) -> Result<String, TextDeriverError>;
}
