//! Delivery provider configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Delivery provider (send API) configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Base URL of the send API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key for authentication, omitted for unauthenticated relays
    /// (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl MailerConfig {
    /// Get the API key as a string reference, if configured
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }
}
