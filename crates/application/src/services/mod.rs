//! Application services

mod email_service;

pub use email_service::{EmailService, SaveInput};
