//! SQLite-backed entity store.
//!
//! All namespaces share one table keyed by `(namespace, key)`. The connection
//! runs in WAL mode with `synchronous = FULL`, so a write has reached disk when
//! the call returns. `busy_timeout` and the pool acquire timeout bound how long
//! any call can wait before surfacing `StorageUnavailable`.

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{
    ClockPort, EntityStore, Namespace, RepoError, Version, VersionedRecord, WritePolicy,
};

/// Connection settings for [`SqliteEntityStore::open`].
#[derive(Debug, Clone)]
pub struct SqliteStoreOptions {
    pub busy_timeout: Duration,
    pub acquire_timeout: Duration,
    pub max_connections: u32,
    pub write_policy: WritePolicy,
}

impl Default for SqliteStoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(5),
            max_connections: 8,
            write_policy: WritePolicy::default(),
        }
    }
}

/// SQLite implementation of the entity store.
pub struct SqliteEntityStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
    write_policy: WritePolicy,
}

impl SqliteEntityStore {
    pub async fn open(
        db_path: &str,
        options: SqliteStoreOptions,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, RepoError> {
        let connect = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(options.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect)
            .await
            .map_err(|e| RepoError::unavailable("open", e))?;

        Self::from_pool(pool, options.write_policy, clock).await
    }

    pub async fn from_pool(
        pool: SqlitePool,
        write_policy: WritePolicy,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entities (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value_json TEXT NOT NULL,
                version INTEGER NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::unavailable("migrate", e))?;

        Ok(Self {
            pool,
            clock,
            write_policy,
        })
    }

    async fn upsert(
        &self,
        namespace: Namespace,
        key: &str,
        value: &str,
    ) -> Result<Version, RepoError> {
        let now = self.clock.now().to_rfc3339();

        let version: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO entities (namespace, key, value_json, version, updated_at)
            VALUES (?, ?, ?, 1, ?)
            ON CONFLICT(namespace, key) DO UPDATE SET
                value_json = excluded.value_json,
                version = entities.version + 1,
                updated_at = excluded.updated_at
            RETURNING version
            "#,
        )
        .bind(namespace.as_str())
        .bind(key)
        .bind(value)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("set", e))?;

        Ok(Version::new(version))
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<String>, RepoError> {
        Ok(self.read(namespace, key).await?.map(|record| record.value))
    }

    async fn set(&self, namespace: Namespace, key: &str, value: &str) -> Result<(), RepoError> {
        self.upsert(namespace, key, value).await?;
        Ok(())
    }

    async fn delete(&self, namespace: Namespace, key: &str) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM entities WHERE namespace = ? AND key = ?")
            .bind(namespace.as_str())
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn scan_prefix(
        &self,
        namespace: Namespace,
        prefix: &str,
    ) -> Result<Vec<(String, String)>, RepoError> {
        // substr() instead of LIKE: keys may contain '%' and '_'
        let rows = sqlx::query(
            r#"
            SELECT key, value_json FROM entities
            WHERE namespace = ? AND substr(key, 1, length(?)) = ?
            ORDER BY key
            "#,
        )
        .bind(namespace.as_str())
        .bind(prefix)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("scan_prefix", e))?;

        rows.into_iter()
            .map(|row| {
                let key: String = row
                    .try_get("key")
                    .map_err(|e| RepoError::unavailable("scan_prefix", e))?;
                let value: String = row
                    .try_get("value_json")
                    .map_err(|e| RepoError::unavailable("scan_prefix", e))?;
                Ok((key, value))
            })
            .collect()
    }

    async fn read(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<VersionedRecord>, RepoError> {
        let row = sqlx::query(
            "SELECT value_json, version FROM entities WHERE namespace = ? AND key = ?",
        )
        .bind(namespace.as_str())
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("get", e))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value_json")
                    .map_err(|e| RepoError::unavailable("get", e))?;
                let version: i64 = row
                    .try_get("version")
                    .map_err(|e| RepoError::unavailable("get", e))?;
                Ok(Some(VersionedRecord {
                    value,
                    version: Version::new(version),
                }))
            }
            None => Ok(None),
        }
    }

    async fn write_if_unchanged(
        &self,
        namespace: Namespace,
        key: &str,
        value: &str,
        expected: Option<Version>,
    ) -> Result<Version, RepoError> {
        if self.write_policy == WritePolicy::LastWriteWins {
            return self.upsert(namespace, key, value).await;
        }

        let now = self.clock.now().to_rfc3339();
        let written: Option<i64> = match expected {
            Some(version) => sqlx::query_scalar(
                r#"
                UPDATE entities
                SET value_json = ?, version = version + 1, updated_at = ?
                WHERE namespace = ? AND key = ? AND version = ?
                RETURNING version
                "#,
            )
            .bind(value)
            .bind(now)
            .bind(namespace.as_str())
            .bind(key)
            .bind(version.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("write_if_unchanged", e))?,
            None => sqlx::query_scalar(
                r#"
                INSERT INTO entities (namespace, key, value_json, version, updated_at)
                VALUES (?, ?, ?, 1, ?)
                ON CONFLICT(namespace, key) DO NOTHING
                RETURNING version
                "#,
            )
            .bind(namespace.as_str())
            .bind(key)
            .bind(value)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("write_if_unchanged", e))?,
        };

        written
            .map(Version::new)
            .ok_or_else(|| RepoError::conflict(namespace.as_str(), key))
    }
}
