//! Mapping between [`EmailRecord`] and its stored item form
//!
//! The item layout keys every record by `MessageID` and folds the lifecycle
//! state into `TypeYearMonth` (`kind#YYYY-MM`), with the day and time of day
//! split off into `DateTime` (`DD-HH:MM:SS`). Address fields become string
//! sets and are omitted entirely when empty; decoding treats an absent set
//! as empty. Attributes outside the core field set pass through both
//! directions unmodified, so decode-then-encode preserves whatever the
//! inbound pipeline stored alongside the core fields.
//!
//! Timestamps are stored at second precision; sub-second components are
//! dropped on encode.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::entities::{EmailKind, EmailRecord};
use crate::errors::DomainError;
use crate::item::{AttrValue, Item};
use crate::value_objects::MessageId;

/// Attribute holding the record primary key
pub const ATTR_MESSAGE_ID: &str = "MessageID";
/// Attribute holding the record kind and year-month, joined with `#`
pub const ATTR_TYPE_YEAR_MONTH: &str = "TypeYearMonth";
/// Attribute holding the day and time of day of the last write
pub const ATTR_DATE_TIME: &str = "DateTime";

const ATTR_SUBJECT: &str = "Subject";
const ATTR_FROM: &str = "From";
const ATTR_TO: &str = "To";
const ATTR_CC: &str = "Cc";
const ATTR_BCC: &str = "Bcc";
const ATTR_REPLY_TO: &str = "ReplyTo";
const ATTR_TEXT: &str = "Text";
const ATTR_HTML: &str = "HTML";

/// Encode a record into its stored item form
pub fn to_item(record: &EmailRecord) -> Item {
    let mut item = record.extra.clone();
    item.insert(
        ATTR_MESSAGE_ID.to_string(),
        AttrValue::s(record.id.as_str()),
    );
    item.insert(
        ATTR_TYPE_YEAR_MONTH.to_string(),
        AttrValue::s(type_year_month(record.kind, record.updated_at)),
    );
    item.insert(
        ATTR_DATE_TIME.to_string(),
        AttrValue::s(day_time(record.updated_at)),
    );
    item.insert(ATTR_SUBJECT.to_string(), AttrValue::s(record.subject.as_str()));
    item.insert(ATTR_TEXT.to_string(), AttrValue::s(record.text.as_str()));
    item.insert(ATTR_HTML.to_string(), AttrValue::s(record.html.as_str()));
    for (name, addresses) in [
        (ATTR_FROM, &record.from),
        (ATTR_TO, &record.to),
        (ATTR_CC, &record.cc),
        (ATTR_BCC, &record.bcc),
        (ATTR_REPLY_TO, &record.reply_to),
    ] {
        if !addresses.is_empty() {
            item.insert(name.to_string(), AttrValue::Ss(addresses.clone()));
        }
    }
    item
}

/// Decode a stored item back into a record
///
/// # Errors
/// Returns an error if a required attribute is missing, carries the wrong
/// value type, or cannot be parsed.
pub fn from_item(mut item: Item) -> Result<EmailRecord, DomainError> {
    let raw_id = require_string(&mut item, ATTR_MESSAGE_ID)?;
    let id = MessageId::new(raw_id)
        .map_err(|_| DomainError::malformed_item(ATTR_MESSAGE_ID, "must not be empty"))?;

    let type_year_month = require_string(&mut item, ATTR_TYPE_YEAR_MONTH)?;
    let (kind, year_month) = split_type_year_month(&type_year_month)?;

    let day_time = require_string(&mut item, ATTR_DATE_TIME)?;
    let updated_at = parse_timestamp(year_month, &day_time)?;

    let subject = take_string(&mut item, ATTR_SUBJECT)?.unwrap_or_default();
    let text = take_string(&mut item, ATTR_TEXT)?.unwrap_or_default();
    let html = take_string(&mut item, ATTR_HTML)?.unwrap_or_default();
    let from = take_string_set(&mut item, ATTR_FROM)?;
    let to = take_string_set(&mut item, ATTR_TO)?;
    let cc = take_string_set(&mut item, ATTR_CC)?;
    let bcc = take_string_set(&mut item, ATTR_BCC)?;
    let reply_to = take_string_set(&mut item, ATTR_REPLY_TO)?;

    Ok(EmailRecord {
        id,
        kind,
        updated_at,
        subject,
        from,
        to,
        cc,
        bcc,
        reply_to,
        text,
        html,
        extra: item,
    })
}

/// Extract the record kind without decoding the whole item
///
/// # Errors
/// Returns an error if `TypeYearMonth` is missing or malformed.
pub fn kind_of(item: &Item) -> Result<EmailKind, DomainError> {
    let type_year_month = item
        .get(ATTR_TYPE_YEAR_MONTH)
        .and_then(AttrValue::as_s)
        .ok_or_else(|| {
            DomainError::malformed_item(ATTR_TYPE_YEAR_MONTH, "missing or not a string")
        })?;
    let (kind, _) = split_type_year_month(type_year_month)?;
    Ok(kind)
}

/// Extract the primary key without decoding the whole item
///
/// # Errors
/// Returns an error if `MessageID` is missing, not a string, or empty.
pub fn message_id_of(item: &Item) -> Result<MessageId, DomainError> {
    let raw = item
        .get(ATTR_MESSAGE_ID)
        .and_then(AttrValue::as_s)
        .ok_or_else(|| DomainError::malformed_item(ATTR_MESSAGE_ID, "missing or not a string"))?;
    MessageId::new(raw).map_err(|_| DomainError::malformed_item(ATTR_MESSAGE_ID, "must not be empty"))
}

fn type_year_month(kind: EmailKind, at: DateTime<Utc>) -> String {
    format!("{kind}#{}", at.format("%Y-%m"))
}

fn day_time(at: DateTime<Utc>) -> String {
    at.format("%d-%H:%M:%S").to_string()
}

fn split_type_year_month(value: &str) -> Result<(EmailKind, &str), DomainError> {
    let (kind_str, year_month) = value.split_once('#').ok_or_else(|| {
        DomainError::malformed_item(ATTR_TYPE_YEAR_MONTH, "missing '#' separator")
    })?;
    let kind = kind_str.parse::<EmailKind>().map_err(|_| {
        DomainError::malformed_item(
            ATTR_TYPE_YEAR_MONTH,
            format!("unknown kind: {kind_str}"),
        )
    })?;
    Ok((kind, year_month))
}

fn parse_timestamp(year_month: &str, day_time: &str) -> Result<DateTime<Utc>, DomainError> {
    let combined = format!("{year_month}-{day_time}");
    NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d-%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            DomainError::malformed_item(
                ATTR_DATE_TIME,
                format!("invalid timestamp: {combined}"),
            )
        })
}

fn take_string(item: &mut Item, name: &str) -> Result<Option<String>, DomainError> {
    match item.remove(name) {
        None => Ok(None),
        Some(AttrValue::S(value)) => Ok(Some(value)),
        Some(_) => Err(DomainError::malformed_item(name, "expected a string value")),
    }
}

fn require_string(item: &mut Item, name: &str) -> Result<String, DomainError> {
    take_string(item, name)?
        .ok_or_else(|| DomainError::malformed_item(name, "attribute is missing"))
}

fn take_string_set(item: &mut Item, name: &str) -> Result<Vec<String>, DomainError> {
    match item.remove(name) {
        None => Ok(Vec::new()),
        Some(AttrValue::Ss(values)) => Ok(values),
        Some(_) => Err(DomainError::malformed_item(name, "expected a string set")),
    }
}
