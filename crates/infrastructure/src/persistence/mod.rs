//! Persistence module
//!
//! SQLite-based storage for the single-table email record store.

pub mod connection;
pub mod item_store;

pub use connection::{Database, DatabaseError, DatabaseOptions};
pub use item_store::SqliteItemStore;
