//! Draft persistence: input validation, text derivation, conditional writes

use domain::codec;
use domain::{EmailKind, EmailRecord, MessageId, TextPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{EmailService, map_store_error};
use crate::error::EmailError;
use crate::ports::Condition;

/// Input to [`EmailService::save`] and [`EmailService::create`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveInput {
    /// Draft identity; must be non-empty for `save`, empty for `create`
    #[serde(default)]
    pub message_id: String,
    /// Subject line
    #[serde(default)]
    pub subject: String,
    /// Sender addresses
    #[serde(default)]
    pub from: Vec<String>,
    /// Primary recipients
    #[serde(default)]
    pub to: Vec<String>,
    /// Carbon-copy recipients
    #[serde(default)]
    pub cc: Vec<String>,
    /// Blind carbon-copy recipients
    #[serde(default)]
    pub bcc: Vec<String>,
    /// Reply-To addresses
    #[serde(default)]
    pub reply_to: Vec<String>,
    /// Plain-text body
    #[serde(default)]
    pub text: String,
    /// HTML body
    #[serde(default)]
    pub html: String,
    /// Text-generation policy: `off`, `on`, `auto`; empty selects `off`
    #[serde(default)]
    pub generate_text: String,
    /// Dispatch the draft after saving it
    #[serde(default)]
    pub send: bool,
}

impl EmailService {
    /// Save a draft, optionally dispatching it afterwards
    ///
    /// The draft is always persisted first. With `send` set, the saved
    /// draft is then handed to the delivery provider and atomically
    /// replaced by its sent record; the returned record carries the
    /// provider-assigned identity in that case.
    #[instrument(skip(self, input), fields(id = %input.message_id, send = input.send))]
    pub async fn save(&self, input: SaveInput) -> Result<EmailRecord, EmailError> {
        let policy = input.generate_text.parse::<TextPolicy>()?;
        let id = MessageId::new(input.message_id.as_str())?;

        let draft = self.save_draft(id, &input, policy).await?;
        if !input.send {
            return Ok(draft);
        }
        self.send_and_replace(draft).await
    }

    /// Save a new draft under a generated identifier
    ///
    /// Behaves like [`EmailService::save`] except that the identity is
    /// chosen here; `input.message_id` must be empty.
    #[instrument(skip(self, input), fields(send = input.send))]
    pub async fn create(&self, mut input: SaveInput) -> Result<EmailRecord, EmailError> {
        if !input.message_id.is_empty() {
            return Err(EmailError::invalid_input(
                "message ID must be empty when creating a draft",
            ));
        }
        input.message_id = MessageId::generate_draft().into();
        self.save(input).await
    }

    /// Persist the draft under an optimistic-concurrency condition
    ///
    /// Reads the current state under `id` first. A missing item means a
    /// first save; anything other than a draft is refused outright. The
    /// write is then pinned to exactly the state observed, so a concurrent
    /// actor retiring the draft in between makes the write fail instead of
    /// resurrecting the record.
    async fn save_draft(
        &self,
        id: MessageId,
        input: &SaveInput,
        policy: TextPolicy,
    ) -> Result<EmailRecord, EmailError> {
        let existing = self
            .store
            .get(&id)
            .await
            .map_err(|err| map_store_error(&id, err))?;

        let condition = match existing {
            None => Condition::Absent,
            Some(item) => {
                let kind = codec::kind_of(&item)?;
                if kind != EmailKind::Draft {
                    return Err(EmailError::not_draft(id.as_str()));
                }
                Condition::KindIs(EmailKind::Draft)
            },
        };

        let text = self.final_text(input, policy)?;
        let record = EmailRecord::new(id, EmailKind::Draft, self.clock.now())
            .with_subject(input.subject.as_str())
            .with_from(input.from.iter().cloned())
            .with_to(input.to.iter().cloned())
            .with_cc(input.cc.iter().cloned())
            .with_bcc(input.bcc.iter().cloned())
            .with_reply_to(input.reply_to.iter().cloned())
            .with_text(text)
            .with_html(input.html.as_str());

        self.store
            .put_conditional(codec::to_item(&record), condition)
            .await
            .map_err(|err| map_store_error(&record.id, err))?;

        debug!(id = %record.id, "Draft saved");
        Ok(record)
    }

    /// Compute the final plain-text body per the caller's policy
    fn final_text(&self, input: &SaveInput, policy: TextPolicy) -> Result<String, EmailError> {
        match policy {
            TextPolicy::Off => Ok(input.text.clone()),
            TextPolicy::Auto if !input.text.is_empty() => Ok(input.text.clone()),
            TextPolicy::On | TextPolicy::Auto => self
                .text_deriver
                .derive_text(&input.html)
                .map_err(|err| EmailError::invalid_input(err.to_string())),
        }
    }
}
