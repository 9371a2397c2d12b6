//! HTTP delivery client
//!
//! Implements `MailerPort` against a JSON send API. The provider assigns
//! the definitive message identifier and returns it in the response body;
//! that identifier becomes the key of the sent record.

use application::ports::{MailerError, MailerPort};
use async_trait::async_trait;
use domain::{EmailRecord, MessageId};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::MailerConfig;

/// JSON body of a send request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    subject: &'a str,
    from: &'a [String],
    to: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    cc: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    bcc: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    reply_to: &'a [String],
    text: &'a str,
    html: &'a str,
}

impl<'a> SendRequest<'a> {
    fn from_record(email: &'a EmailRecord) -> Self {
        Self {
            subject: &email.subject,
            from: &email.from,
            to: &email.to,
            cc: &email.cc,
            bcc: &email.bcc,
            reply_to: &email.reply_to,
            text: &email.text,
            html: &email.html,
        }
    }
}

/// JSON body of a send response
#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(rename = "messageID")]
    message_id: String,
}

/// HTTP client for the send API
#[derive(Debug)]
pub struct HttpMailer {
    client: Client,
    config: MailerConfig,
}

impl HttpMailer {
    /// Create a new mailer with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: MailerConfig) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailerError::Unreachable(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MailerPort for HttpMailer {
    #[instrument(skip(self, email), fields(id = %email.id))]
    async fn send(&self, email: &EmailRecord) -> Result<MessageId, MailerError> {
        let url = format!("{}/v1/messages", self.config.base_url);
        debug!(url = %url, "Dispatching message");

        let mut request = self.client.post(&url).json(&SendRequest::from_record(email));
        if let Some(key) = self.config.api_key_str() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailerError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(MailerError::Unreachable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected(format!("HTTP {status}: {detail}")));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| MailerError::InvalidResponse(e.to_string()))?;

        debug!(message_id = %parsed.message_id, "Provider accepted message");
        MessageId::new(parsed.message_id).map_err(|e| MailerError::InvalidResponse(e.to_string()))
    }
}
