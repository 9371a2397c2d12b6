//! Application layer - use cases and orchestration
//!
//! Contains the email lifecycle service and the port definitions it drives.
//! Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::EmailError;
pub use ports::*;
pub use services::*;
