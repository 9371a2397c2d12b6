//! Outbound dispatch and the atomic draft-to-sent swap

use domain::codec;
use domain::{EmailKind, EmailRecord};
use tracing::{error, info, instrument};

use super::{EmailService, map_store_error};
use crate::error::EmailError;
use crate::ports::{Condition, WriteOp};

impl EmailService {
    /// Dispatch a saved draft and atomically replace it with its sent record
    ///
    /// The external send happens first; a failure there leaves the draft
    /// untouched and the call safe to retry. Once the provider accepts, the
    /// draft is retired and the sent record created in one transaction, so
    /// no intermediate state is ever observable and concurrent senders
    /// produce at most one sent record. The delete is conditioned on the
    /// record still being a draft, the insert on the provider-assigned key
    /// being free.
    ///
    /// A transaction failure after acceptance cannot be compensated; the
    /// message is out. It is logged at error level and surfaced to the
    /// caller, leaving the store inconsistent with the provider until a
    /// corrective re-save.
    #[instrument(skip(self, draft), fields(id = %draft.id))]
    pub(crate) async fn send_and_replace(
        &self,
        draft: EmailRecord,
    ) -> Result<EmailRecord, EmailError> {
        let sent_id = self
            .mailer
            .send(&draft)
            .await
            .map_err(EmailError::SendFailed)?;
        info!(draft_id = %draft.id, sent_id = %sent_id, "Provider accepted message");

        let draft_id = draft.id.clone();
        let sent = draft.into_sent(sent_id, self.clock.now());

        let ops = vec![
            WriteOp::Delete {
                id: draft_id.clone(),
                condition: Condition::KindIs(EmailKind::Draft),
            },
            WriteOp::Put {
                item: codec::to_item(&sent),
                condition: Condition::Absent,
            },
        ];
        if let Err(err) = self.store.transact_write(ops).await {
            error!(
                draft_id = %draft_id,
                sent_id = %sent.id,
                error = %err,
                "Message dispatched but the draft swap failed; store now disagrees with the provider"
            );
            return Err(map_store_error(&draft_id, err));
        }

        info!(sent_id = %sent.id, "Draft retired into sent record");
        Ok(sent)
    }
}
