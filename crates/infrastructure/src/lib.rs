//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the SQLite item
//! store, the HTTP delivery client, HTML-to-text conversion, and the system
//! clock, plus configuration loading and telemetry setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{HtmlTextDeriver, HttpMailer, SystemClock};
pub use config::{AppConfig, DatabaseConfig, MailerConfig};
pub use persistence::{Database, DatabaseError, SqliteItemStore};
pub use telemetry::{TelemetryConfig, init_telemetry};
