//! Telemetry
//!
//! Structured logging setup via `tracing-subscriber`. Output is either
//! human-readable console lines or JSON lines for log shippers.

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Telemetry initialization failed: {0}")]
    Init(String),
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "mailvault=debug,sqlx=warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    info!(filter = %config.log_level, "Telemetry initialized");
    Ok(())
}
