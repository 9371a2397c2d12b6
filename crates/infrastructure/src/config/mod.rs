//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `database`: SQLite database settings
//! - `mailer`: delivery provider (send API) settings
//!
//! Telemetry settings live with the telemetry module and are embedded here
//! as a section.

mod database;
mod mailer;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use database::DatabaseConfig;
pub use mailer::MailerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Delivery provider settings
    #[serde(default)]
    pub mailer: MailerConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Values resolve in order: built-in defaults, then an optional
    /// `config.toml` next to the binary, then `MAILVAULT_`-prefixed
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value fails to
    /// deserialize into the expected type.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("database.path", "mailvault.db")?
            .set_default("mailer.base_url", "http://localhost:8080")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., MAILVAULT_DATABASE_PATH)
            .add_source(
                config::Environment::with_prefix("MAILVAULT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
