//! SQLite item store
//!
//! Implements the `ItemStorePort` over the single `emails` table. Each
//! record occupies one row keyed by its message ID, with the full attribute
//! map serialized as JSON and the kind denormalized into its own column.
//! Conditions compile into the mutating statement itself, so a check and
//! its write land as one atomic step; `transact_write` wraps the guarded
//! statements in a transaction that rolls back when any guard misses.

use application::ports::{Condition, ItemStoreError, ItemStorePort, WriteOp};
use async_trait::async_trait;
use domain::{Item, MessageId, codec};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, instrument};

/// SQLite-based item store
#[derive(Debug, Clone)]
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    /// Create a new SQLite item store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Row image of an item, ready for binding
struct EncodedItem {
    message_id: String,
    kind: &'static str,
    json: String,
}

fn encode_item(item: &Item) -> Result<EncodedItem, ItemStoreError> {
    let message_id =
        codec::message_id_of(item).map_err(|err| ItemStoreError::Malformed(err.to_string()))?;
    let kind = codec::kind_of(item).map_err(|err| ItemStoreError::Malformed(err.to_string()))?;
    let json =
        serde_json::to_string(item).map_err(|err| ItemStoreError::Malformed(err.to_string()))?;
    Ok(EncodedItem {
        message_id: message_id.into(),
        kind: kind.as_str(),
        json,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> ItemStoreError {
    ItemStoreError::Backend(err.to_string())
}

/// Write one item under its condition; zero affected rows means the guard
/// missed
async fn put_guarded<'e, E>(
    executor: E,
    item: &Item,
    condition: Condition,
) -> Result<(), ItemStoreError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let encoded = encode_item(item)?;
    let result = match condition {
        Condition::None => sqlx::query(
            r"
            INSERT INTO emails (message_id, kind, item)
            VALUES ($1, $2, $3)
            ON CONFLICT(message_id) DO UPDATE SET
                kind = excluded.kind,
                item = excluded.item
            ",
        )
        .bind(&encoded.message_id)
        .bind(encoded.kind)
        .bind(&encoded.json)
        .execute(executor)
        .await
        .map_err(map_sqlx_error)?,
        Condition::Absent => sqlx::query(
            r"
            INSERT INTO emails (message_id, kind, item)
            VALUES ($1, $2, $3)
            ON CONFLICT(message_id) DO NOTHING
            ",
        )
        .bind(&encoded.message_id)
        .bind(encoded.kind)
        .bind(&encoded.json)
        .execute(executor)
        .await
        .map_err(map_sqlx_error)?,
        Condition::KindIs(kind) => sqlx::query(
            r"
            UPDATE emails SET kind = $1, item = $2
            WHERE message_id = $3 AND kind = $4
            ",
        )
        .bind(encoded.kind)
        .bind(&encoded.json)
        .bind(&encoded.message_id)
        .bind(kind.as_str())
        .execute(executor)
        .await
        .map_err(map_sqlx_error)?,
    };

    if result.rows_affected() == 0 {
        return Err(ItemStoreError::ConditionFailed);
    }
    Ok(())
}

/// Delete one item under its condition
async fn delete_guarded<'e, E>(
    executor: E,
    id: &MessageId,
    condition: Condition,
) -> Result<(), ItemStoreError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    match condition {
        Condition::None => {
            sqlx::query("DELETE FROM emails WHERE message_id = $1")
                .bind(id.as_str())
                .execute(executor)
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        },
        Condition::Absent => {
            let exists: bool =
                sqlx::query_scalar("SELECT COUNT(*) > 0 FROM emails WHERE message_id = $1")
                    .bind(id.as_str())
                    .fetch_one(executor)
                    .await
                    .map_err(map_sqlx_error)?;
            if exists {
                return Err(ItemStoreError::ConditionFailed);
            }
            Ok(())
        },
        Condition::KindIs(kind) => {
            let result = sqlx::query("DELETE FROM emails WHERE message_id = $1 AND kind = $2")
                .bind(id.as_str())
                .bind(kind.as_str())
                .execute(executor)
                .await
                .map_err(map_sqlx_error)?;
            if result.rows_affected() == 0 {
                return Err(ItemStoreError::ConditionFailed);
            }
            Ok(())
        },
    }
}

#[async_trait]
impl ItemStorePort for SqliteItemStore {
    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &MessageId) -> Result<Option<Item>, ItemStoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT item FROM emails WHERE message_id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        row.map(|(json,)| {
            serde_json::from_str(&json).map_err(|err| ItemStoreError::Malformed(err.to_string()))
        })
        .transpose()
    }

    #[instrument(skip(self, item))]
    async fn put_conditional(
        &self,
        item: Item,
        condition: Condition,
    ) -> Result<(), ItemStoreError> {
        put_guarded(&self.pool, &item, condition).await?;
        debug!("Item written");
        Ok(())
    }

    #[instrument(skip(self, ops), fields(ops = ops.len()))]
    async fn transact_write(&self, ops: Vec<WriteOp>) -> Result<(), ItemStoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // A miss drops the transaction, rolling back everything before it
        for op in &ops {
            match op {
                WriteOp::Put { item, condition } => {
                    put_guarded(&mut *tx, item, *condition).await?;
                },
                WriteOp::Delete { id, condition } => {
                    delete_guarded(&mut *tx, id, *condition).await?;
                },
            }
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!("Transaction committed");
        Ok(())
    }
}
