//! Single-table item store port
//!
//! Defines the interface to the key-value store holding all email records.
//! The surface mirrors the primitives of compare-and-swap-capable stores:
//! point reads and conditional writes, alone or grouped into all-or-nothing
//! transactions. Every mutation carries a [`Condition`]; unconditioned
//! overwrites exist only as [`Condition::None`].

use async_trait::async_trait;
use domain::{EmailKind, Item, MessageId};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Item store errors
#[derive(Debug, Error)]
pub enum ItemStoreError {
    /// A write's condition was not satisfied by the stored state
    #[error("Conditional check failed")]
    ConditionFailed,

    /// An item exists but cannot be interpreted
    #[error("Malformed item: {0}")]
    Malformed(String),

    /// Any other backend failure (connectivity, transaction, serialization)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Predicate a write requires of the stored state under its key
///
/// Conditions are evaluated against the item currently stored under the
/// write's key, atomically with the write itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// No predicate; the write applies unconditionally
    None,
    /// No item may currently exist under the key
    Absent,
    /// An item must currently exist under the key with the given kind
    KindIs(EmailKind),
}

/// One operation inside a write transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert or replace the item stored under the item's `MessageID`
    Put {
        /// Full item to store
        item: Item,
        /// Predicate on the state currently under the item's key
        condition: Condition,
    },
    /// Remove the item stored under `id`
    Delete {
        /// Key of the item to remove
        id: MessageId,
        /// Predicate on the state currently under `id`
        condition: Condition,
    },
}

/// Port for the single-table key-value store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemStorePort: Send + Sync {
    /// Fetch the item stored under `id`, if any
    async fn get(&self, id: &MessageId) -> Result<Option<Item>, ItemStoreError>;

    /// Write a single item, keyed by its `MessageID` attribute, if
    /// `condition` holds
    ///
    /// # Errors
    /// Fails with [`ItemStoreError::ConditionFailed`] when the condition
    /// does not hold; nothing is written in that case.
    async fn put_conditional(&self, item: Item, condition: Condition)
    -> Result<(), ItemStoreError>;

    /// Apply all operations atomically, or none of them
    ///
    /// # Errors
    /// Fails with [`ItemStoreError::ConditionFailed`] when any operation's
    /// condition does not hold; in that case no operation is applied.
    async fn transact_write(&self, ops: Vec<WriteOp>) -> Result<(), ItemStoreError>;
}
