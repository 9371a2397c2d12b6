//! The persisted email record entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::item::Item;
use crate::value_objects::MessageId;

/// Lifecycle state of an email record
///
/// The state determines mutability: drafts may be rewritten in place, sent
/// and received records are immutable through this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    /// A mutable draft, not yet dispatched
    Draft,
    /// Dispatched through the delivery provider; keyed by the provider's id
    Sent,
    /// Deposited by the inbound pipeline
    Received,
}

impl EmailKind {
    /// The wire representation of this kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }

    /// Whether records of this kind may still be mutated
    pub const fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmailKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "received" => Ok(Self::Received),
            other => Err(DomainError::invalid_input(format!(
                "unknown email kind: {other}"
            ))),
        }
    }
}

/// A persisted email record
///
/// Envelope fields are ordered sequences of raw address strings, copied
/// verbatim from the caller. Attributes outside the core field set (thread
/// links, attachments, verdicts) ride along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Primary key
    pub id: MessageId,
    /// Lifecycle state
    pub kind: EmailKind,
    /// Last write time, UTC, set from the injected clock
    pub updated_at: DateTime<Utc>,
    /// Subject line
    pub subject: String,
    /// Sender addresses
    pub from: Vec<String>,
    /// Primary recipients
    pub to: Vec<String>,
    /// Carbon-copy recipients
    pub cc: Vec<String>,
    /// Blind carbon-copy recipients
    pub bcc: Vec<String>,
    /// Reply-To addresses
    pub reply_to: Vec<String>,
    /// Plain-text body, possibly derived from `html`
    pub text: String,
    /// HTML body
    pub html: String,
    /// Secondary attributes passed through unchanged
    pub extra: Item,
}

impl EmailRecord {
    /// Create an empty record of the given kind
    pub fn new(id: MessageId, kind: EmailKind, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind,
            updated_at,
            subject: String::new(),
            from: Vec::new(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: Vec::new(),
            text: String::new(),
            html: String::new(),
            extra: Item::new(),
        }
    }

    /// Set the subject line
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the sender addresses
    #[must_use]
    pub fn with_from(mut self, from: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.from = from.into_iter().map(Into::into).collect();
        self
    }

    /// Set the primary recipients
    #[must_use]
    pub fn with_to(mut self, to: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.to = to.into_iter().map(Into::into).collect();
        self
    }

    /// Set the carbon-copy recipients
    #[must_use]
    pub fn with_cc(mut self, cc: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cc = cc.into_iter().map(Into::into).collect();
        self
    }

    /// Set the blind carbon-copy recipients
    #[must_use]
    pub fn with_bcc(mut self, bcc: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.bcc = bcc.into_iter().map(Into::into).collect();
        self
    }

    /// Set the Reply-To addresses
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.reply_to = reply_to.into_iter().map(Into::into).collect();
        self
    }

    /// Set the plain-text body
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Attach pass-through secondary attributes
    #[must_use]
    pub fn with_extra(mut self, extra: Item) -> Self {
        self.extra = extra;
        self
    }

    /// Whether this record may still be mutated
    pub const fn is_draft(&self) -> bool {
        self.kind.is_draft()
    }

    /// The sent twin of this draft, keyed by the provider-assigned id
    ///
    /// Envelope, bodies and pass-through attributes are carried over
    /// unchanged; only identity, kind and timestamp differ.
    #[must_use]
    pub fn into_sent(self, sent_id: MessageId, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: sent_id,
            kind: EmailKind::Sent,
            updated_at: sent_at,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::item::AttrValue;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 16, 16, 55, 45).unwrap()
    }

    fn sample_draft() -> EmailRecord {
        EmailRecord::new(
            MessageId::new("draft-example").unwrap(),
            EmailKind::Draft,
            fixed_time(),
        )
        .with_subject("subject")
        .with_from(["from@example.com"])
        .with_to(["to@example.com"])
        .with_text("text")
        .with_html("<p>html</p>")
    }

    #[test]
    fn new_record_has_empty_envelope() {
        let record = EmailRecord::new(
            MessageId::new("draft-1").unwrap(),
            EmailKind::Draft,
            fixed_time(),
        );
        assert!(record.subject.is_empty());
        assert!(record.from.is_empty());
        assert!(record.to.is_empty());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn builder_methods_set_fields() {
        let record = sample_draft()
            .with_cc(["cc@example.com"])
            .with_bcc(["bcc@example.com"])
            .with_reply_to(["reply@example.com"]);
        assert_eq!(record.subject, "subject");
        assert_eq!(record.from, vec!["from@example.com"]);
        assert_eq!(record.cc, vec!["cc@example.com"]);
        assert_eq!(record.bcc, vec!["bcc@example.com"]);
        assert_eq!(record.reply_to, vec!["reply@example.com"]);
        assert_eq!(record.text, "text");
        assert_eq!(record.html, "<p>html</p>");
    }

    #[test]
    fn draft_is_mutable_sent_is_not() {
        assert!(EmailKind::Draft.is_draft());
        assert!(!EmailKind::Sent.is_draft());
        assert!(!EmailKind::Received.is_draft());
    }

    #[test]
    fn into_sent_swaps_identity_and_kind() {
        let later = Utc.with_ymd_and_hms(2022, 3, 16, 17, 0, 0).unwrap();
        let sent = sample_draft().into_sent(MessageId::new("sent-message-id").unwrap(), later);
        assert_eq!(sent.id.as_str(), "sent-message-id");
        assert_eq!(sent.kind, EmailKind::Sent);
        assert_eq!(sent.updated_at, later);
        assert_eq!(sent.subject, "subject");
        assert_eq!(sent.text, "text");
        assert_eq!(sent.html, "<p>html</p>");
    }

    #[test]
    fn into_sent_preserves_extra_attributes() {
        let mut extra = Item::new();
        extra.insert("InReplyTo".to_string(), AttrValue::s("msg-0"));
        let sent = sample_draft()
            .with_extra(extra.clone())
            .into_sent(MessageId::new("sent-1").unwrap(), fixed_time());
        assert_eq!(sent.extra, extra);
    }

    #[test]
    fn kind_parses_from_wire_strings() {
        assert_eq!("draft".parse::<EmailKind>().unwrap(), EmailKind::Draft);
        assert_eq!("sent".parse::<EmailKind>().unwrap(), EmailKind::Sent);
        assert_eq!(
            "received".parse::<EmailKind>().unwrap(),
            EmailKind::Received
        );
        assert!("inbox".parse::<EmailKind>().is_err());
    }

    #[test]
    fn kind_displays_as_wire_string() {
        assert_eq!(EmailKind::Draft.to_string(), "draft");
        assert_eq!(EmailKind::Sent.to_string(), "sent");
        assert_eq!(EmailKind::Received.to_string(), "received");
    }
}
