//! Domain layer for Mailvault
//!
//! Contains the email record entity, value objects, the stored-item
//! representation, the record codec, and domain errors. This layer has no
//! async code and no I/O.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod item;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use item::{AttrValue, Item};
pub use value_objects::*;
