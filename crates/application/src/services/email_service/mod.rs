//! Email lifecycle service
//!
//! Orchestrates the draft lifecycle over the item store, from conditional
//! draft writes through dispatch to the atomic draft-to-sent swap. Split
//! by concern:
//! - `draft`: input validation, text derivation, conditional draft writes
//! - `send`: external dispatch and the swap transaction

mod draft;
mod send;
#[cfg(test)]
pub(crate) mod test_support;

use std::{fmt, sync::Arc};

use domain::codec;
use domain::{EmailKind, EmailRecord, Item, MessageId};
use tracing::{info, instrument};

use crate::error::EmailError;
use crate::ports::{
    ClockPort, Condition, ItemStoreError, ItemStorePort, MailerPort, TextDeriverPort,
};

pub use draft::SaveInput;

/// Service managing the lifecycle of email records
///
/// All collaborators are injected once at construction and treated as
/// read-only; each call runs as an independent unit of work against the
/// shared store.
pub struct EmailService {
    store: Arc<dyn ItemStorePort>,
    mailer: Arc<dyn MailerPort>,
    text_deriver: Arc<dyn TextDeriverPort>,
    clock: Arc<dyn ClockPort>,
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService").finish_non_exhaustive()
    }
}

impl EmailService {
    /// Create a new email service
    pub fn new(
        store: Arc<dyn ItemStorePort>,
        mailer: Arc<dyn MailerPort>,
        text_deriver: Arc<dyn TextDeriverPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            mailer,
            text_deriver,
            clock,
        }
    }

    /// Fetch a record by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<EmailRecord, EmailError> {
        let id = MessageId::new(id)?;
        let item = self
            .store
            .get(&id)
            .await
            .map_err(|err| map_store_error(&id, err))?
            .ok_or_else(|| EmailError::not_found(id.as_str()))?;
        codec::from_item(item).map_err(EmailError::from)
    }

    /// Store a received email deposited by the inbound pipeline
    ///
    /// The pipeline precomputes the full item, threading hints included;
    /// this end only persists it and hands back the decoded record. The
    /// write is unconditional because redeliveries replay the same item.
    #[instrument(skip(self, item))]
    pub async fn store_received(&self, item: Item) -> Result<EmailRecord, EmailError> {
        let kind =
            codec::kind_of(&item).map_err(|err| EmailError::invalid_input(err.to_string()))?;
        if kind != EmailKind::Received {
            return Err(EmailError::invalid_input(format!(
                "expected a received item, got kind {kind}"
            )));
        }
        let record =
            codec::from_item(item).map_err(|err| EmailError::invalid_input(err.to_string()))?;

        self.store
            .put_conditional(codec::to_item(&record), Condition::None)
            .await
            .map_err(|err| map_store_error(&record.id, err))?;

        info!(id = %record.id, "Stored received email");
        Ok(record)
    }
}

/// Map store failures onto the caller-facing taxonomy
///
/// A failed condition means the record under `id` is gone or changed
/// identity since it was read, which callers observe as the draft not being
/// found.
fn map_store_error(id: &MessageId, err: ItemStoreError) -> EmailError {
    match err {
        ItemStoreError::ConditionFailed => EmailError::not_found(id.as_str()),
        other => EmailError::Storage(other),
    }
}
