//! In-process fakes shared by the service tests
//!
//! The store fake implements the same condition semantics the port
//! documents, so lifecycle tests exercise real compare-and-swap behavior
//! instead of mock choreography.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::{EmailKind, EmailRecord, Item, MessageId, codec};
use parking_lot::Mutex;

use crate::ports::{
    ClockPort, Condition, ItemStoreError, ItemStorePort, MailerError, MailerPort, TextDeriverError,
    TextDeriverPort, WriteOp,
};

/// Single-table store backed by a mutex-guarded map
///
/// Conditions are checked under the lock, so interleaved callers observe
/// the same win-or-lose outcomes a real conditional store produces. The
/// lock is never held across an await point.
pub struct InMemoryItemStore {
    items: Mutex<BTreeMap<String, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
        }
    }

    /// Preload an item, bypassing all conditions
    #[allow(clippy::expect_used)]
    pub fn seed(&self, item: Item) {
        let key = codec::message_id_of(&item).expect("seeded item must carry a MessageID");
        self.items.lock().insert(key.into(), item);
    }

    pub fn get_raw(&self, id: &str) -> Option<Item> {
        self.items.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn kind_counts(&self) -> HashMap<EmailKind, usize> {
        let mut counts = HashMap::new();
        for item in self.items.lock().values() {
            if let Ok(kind) = codec::kind_of(item) {
                *counts.entry(kind).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check(
    items: &BTreeMap<String, Item>,
    key: &str,
    condition: Condition,
) -> Result<(), ItemStoreError> {
    let holds = match condition {
        Condition::None => true,
        Condition::Absent => !items.contains_key(key),
        Condition::KindIs(kind) => items
            .get(key)
            .is_some_and(|item| codec::kind_of(item).is_ok_and(|stored| stored == kind)),
    };
    if holds {
        Ok(())
    } else {
        Err(ItemStoreError::ConditionFailed)
    }
}

fn key_of(item: &Item) -> Result<MessageId, ItemStoreError> {
    codec::message_id_of(item).map_err(|err| ItemStoreError::Malformed(err.to_string()))
}

#[async_trait]
impl ItemStorePort for InMemoryItemStore {
    async fn get(&self, id: &MessageId) -> Result<Option<Item>, ItemStoreError> {
        Ok(self.items.lock().get(id.as_str()).cloned())
    }

    async fn put_conditional(
        &self,
        item: Item,
        condition: Condition,
    ) -> Result<(), ItemStoreError> {
        let key = key_of(&item)?;
        let mut items = self.items.lock();
        check(&items, key.as_str(), condition)?;
        items.insert(key.into(), item);
        Ok(())
    }

    async fn transact_write(&self, ops: Vec<WriteOp>) -> Result<(), ItemStoreError> {
        let mut items = self.items.lock();

        // All conditions are judged against the pre-transaction state
        for op in &ops {
            match op {
                WriteOp::Put { item, condition } => {
                    check(&items, key_of(item)?.as_str(), *condition)?;
                },
                WriteOp::Delete { id, condition } => check(&items, id.as_str(), *condition)?,
            }
        }

        for op in ops {
            match op {
                WriteOp::Put { item, .. } => {
                    let key = key_of(&item)?;
                    items.insert(key.into(), item);
                },
                WriteOp::Delete { id, .. } => {
                    items.remove(id.as_str());
                },
            }
        }
        Ok(())
    }
}

/// Clock pinned to an instant the test controls
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the reported instant forward
    pub fn advance(&self, delta: Duration) {
        *self.now.lock() += delta;
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Tag-stripping stand-in for the real HTML converter
pub struct FakeTextDeriver;

impl TextDeriverPort for FakeTextDeriver {
    fn derive_text(&self, html: &str) -> Result<String, TextDeriverError> {
        let mut text = String::new();
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(ch),
                _ => {},
            }
        }
        Ok(text)
    }
}

enum MailerOutcome {
    Accept(String),
    Reject(String),
}

/// Mailer that always answers the same way and counts dispatches
pub struct StaticMailer {
    outcome: MailerOutcome,
    sent: AtomicU32,
}

impl StaticMailer {
    pub fn accepting(id: &str) -> Self {
        Self {
            outcome: MailerOutcome::Accept(id.to_string()),
            sent: AtomicU32::new(0),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            outcome: MailerOutcome::Reject(reason.to_string()),
            sent: AtomicU32::new(0),
        }
    }

    pub fn sent_count(&self) -> u32 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailerPort for StaticMailer {
    async fn send(&self, _email: &EmailRecord) -> Result<MessageId, MailerError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MailerOutcome::Accept(id) => MessageId::new(id.clone())
                .map_err(|err| MailerError::InvalidResponse(err.to_string())),
            MailerOutcome::Reject(reason) => Err(MailerError::Rejected(reason.clone())),
        }
    }
}
