//! Async database connection using sqlx
//!
//! Provides the SQLite pool all stores run on. Migrations are managed via
//! sqlx's `migrate!()` macro using SQL files in the workspace `migrations/`
//! directory.

use std::{path::Path, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use tracing::{debug, info, instrument};

/// Error type for database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connection settings for the SQLite pool
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    /// Database URL (e.g., "sqlite:data.db" or "sqlite::memory:")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep open
    pub min_connections: u32,
    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            url: "sqlite:mailvault.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            wal_mode: true,
        }
    }
}

impl DatabaseOptions {
    /// Create an in-memory database configuration for testing
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1, // Single connection for in-memory
            min_connections: 1,
            wal_mode: false, // Not supported for in-memory
        }
    }

    /// Create a file-based database configuration
    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().display().to_string();
        Self {
            url: format!("sqlite:{path_str}"),
            ..Default::default()
        }
    }
}

/// Async database connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Journal mode, synchronous level and the busy timeout are set as
    /// connect options so every pooled connection carries them, not just
    /// the first one handed out.
    #[instrument(skip_all, fields(url = %options.url))]
    pub async fn new(options: &DatabaseOptions) -> Result<Self, DatabaseError> {
        let mut connect_options = SqliteConnectOptions::from_str(&options.url)?
            .create_if_missing(true)
            // Wait instead of failing fast when another writer holds the lock
            .busy_timeout(Duration::from_secs(5));

        if options.wal_mode && !options.url.contains(":memory:") {
            connect_options = connect_options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
            debug!("WAL mode enabled");
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .connect_with(connect_options)
            .await?;

        info!(
            max_connections = options.max_connections,
            "Database pool created"
        );

        Ok(Self { pool })
    }

    /// Create an in-memory database for testing
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Self::new(&DatabaseOptions::in_memory()).await
    }

    /// Get the underlying pool for raw queries
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations using the workspace migration SQL files
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_in_memory_database() {
        let db = Database::in_memory().await.unwrap();
        let _ = db.pool();
    }

    #[tokio::test]
    async fn migrations_create_emails_table() {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();

        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master \
             WHERE type='table' AND name='emails'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = Database::in_memory().await.unwrap();
        // Running twice should not fail
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn wal_mode_for_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test_wal.db");

        let options = DatabaseOptions::file(&db_path);
        let db = Database::new(&options).await.unwrap();
        db.migrate().await.unwrap();

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(result.0.to_lowercase(), "wal");

        db.close().await;
    }

    #[tokio::test]
    async fn default_options() {
        let options = DatabaseOptions::default();
        assert_eq!(options.max_connections, 5);
        assert!(options.wal_mode);
    }
}
