//! SQLite implementation of TranscriptStore.
//!
//! The store owns its connection pool; nothing outside this adapter holds a
//! database handle. Schema creation is idempotent and runs through
//! [`SqliteTranscriptStore::migrate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::config::DatabaseConfig;
use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::{TenantId, Timestamp, UserId};
use crate::ports::{StoreError, TranscriptStore};

/// SQLite implementation of TranscriptStore.
#[derive(Debug, Clone)]
pub struct SqliteTranscriptStore {
    pool: SqlitePool,
}

impl SqliteTranscriptStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for the configured database, creating the file if needed.
    ///
    /// In-memory databases are private to a connection, so they get a pool of one.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StoreError::connection(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        let max_connections = if config.url.contains(":memory:") {
            1
        } else {
            config.max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(|e| StoreError::connection(format!("Failed to open database: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Creates the `dialogs` table and its index if they do not exist.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dialogs (
                tenant_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                transcript TEXT NOT NULL DEFAULT '',
                last_modified_at TEXT NOT NULL,
                last_modified_epoch INTEGER NOT NULL,
                context TEXT,
                PRIMARY KEY (tenant_id, user_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Migration(format!("Failed to create dialogs table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_dialogs_tenant_recent
            ON dialogs (tenant_id, last_modified_epoch DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Migration(format!("Failed to create dialogs index: {}", e)))?;

        Ok(())
    }

    /// Get a reference to the pool (used by health checks and tests).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn map_sqlx_error(context: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::connection(format!("{}: {}", context, err))
        }
        other => StoreError::query(format!("{}: {}", context, other)),
    }
}

fn row_to_record(tenant: &TenantId, row: &SqliteRow) -> Result<ConversationRecord, StoreError> {
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| StoreError::corrupt(e.to_string()))?;
    let last_modified_at: DateTime<Utc> = row
        .try_get("last_modified_at")
        .map_err(|e| StoreError::corrupt(e.to_string()))?;

    Ok(ConversationRecord {
        tenant_id: tenant.clone(),
        user_id: UserId::new(user_id).map_err(|e| StoreError::corrupt(e.to_string()))?,
        transcript: row
            .try_get("transcript")
            .map_err(|e| StoreError::corrupt(e.to_string()))?,
        last_modified_at: Timestamp::from_datetime(last_modified_at),
        last_modified_epoch: row
            .try_get("last_modified_epoch")
            .map_err(|e| StoreError::corrupt(e.to_string()))?,
        context: row
            .try_get("context")
            .map_err(|e| StoreError::corrupt(e.to_string()))?,
    })
}

#[async_trait]
impl TranscriptStore for SqliteTranscriptStore {
    async fn get(&self, tenant: &TenantId, user: &UserId) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT transcript FROM dialogs WHERE tenant_id = ? AND user_id = ?")
            .bind(tenant.as_str())
            .bind(user.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to load transcript", e))?;

        row.map(|row| {
            row.try_get::<String, _>("transcript")
                .map_err(|e| StoreError::corrupt(e.to_string()))
        })
        .transpose()
    }

    async fn find(
        &self,
        tenant: &TenantId,
        user: &UserId,
    ) -> Result<Option<ConversationRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, transcript, last_modified_at, last_modified_epoch, context
            FROM dialogs
            WHERE tenant_id = ? AND user_id = ?
            "#,
        )
        .bind(tenant.as_str())
        .bind(user.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to load record", e))?;

        row.map(|row| row_to_record(tenant, &row)).transpose()
    }

    async fn put(
        &self,
        tenant: &TenantId,
        user: &UserId,
        transcript: &str,
    ) -> Result<(), StoreError> {
        let now = Timestamp::now();
        sqlx::query(
            r#"
            INSERT INTO dialogs (tenant_id, user_id, transcript, last_modified_at, last_modified_epoch)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (tenant_id, user_id) DO UPDATE SET
                transcript = excluded.transcript,
                last_modified_at = excluded.last_modified_at,
                last_modified_epoch = excluded.last_modified_epoch
            "#,
        )
        .bind(tenant.as_str())
        .bind(user.as_str())
        .bind(transcript)
        .bind(now.as_datetime())
        .bind(now.as_unix_secs())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to save transcript", e))?;

        Ok(())
    }

    async fn create(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError> {
        let now = Timestamp::now();
        let result = sqlx::query(
            r#"
            INSERT INTO dialogs (tenant_id, user_id, transcript, last_modified_at, last_modified_epoch)
            VALUES (?, ?, '', ?, ?)
            ON CONFLICT (tenant_id, user_id) DO NOTHING
            "#,
        )
        .bind(tenant.as_str())
        .bind(user.as_str())
        .bind(now.as_datetime())
        .bind(now.as_unix_secs())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create record", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn exists(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM dialogs WHERE tenant_id = ? AND user_id = ?")
            .bind(tenant.as_str())
            .bind(user.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to check record", e))?;

        Ok(row.is_some())
    }

    async fn delete(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM dialogs WHERE tenant_id = ? AND user_id = ?")
            .bind(tenant.as_str())
            .bind(user.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, tenant: &TenantId) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS user_count FROM dialogs WHERE tenant_id = ?")
            .bind(tenant.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count records", e))?;

        let count: i64 = row
            .try_get("user_count")
            .map_err(|e| StoreError::corrupt(e.to_string()))?;
        Ok(count.max(0) as u64)
    }

    async fn list_page(
        &self,
        tenant: &TenantId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<UserId>, StoreError> {
        let offset = i64::from(page) * i64::from(page_size);
        let rows = sqlx::query(
            r#"
            SELECT user_id FROM dialogs
            WHERE tenant_id = ?
            ORDER BY last_modified_epoch DESC, user_id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(tenant.as_str())
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list records", e))?;

        rows.iter()
            .map(|row| {
                let raw: String = row
                    .try_get("user_id")
                    .map_err(|e| StoreError::corrupt(e.to_string()))?;
                UserId::new(raw).map_err(|e| StoreError::corrupt(e.to_string()))
            })
            .collect()
    }
}
