//! Domain entities

mod email_record;

pub use email_record::{EmailKind, EmailRecord};
