//! SQLite key-value storage adapter.

use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::domain::error::StockwatchError;
use crate::domain::settings::Settings;
use crate::ports::storage_port::StoragePort;

#[derive(Clone)]
pub struct SqliteStorage {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `settings.db_path` and
    /// ensures the schema exists.
    pub fn from_settings(settings: &Settings) -> Result<Self, StockwatchError> {
        let manager = SqliteConnectionManager::file(&settings.db_path);
        let pool = Pool::builder()
            .max_size(settings.pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| StockwatchError::Storage {
                reason: e.to_string(),
            })?;

        debug!(path = %settings.db_path.display(), "opened sqlite storage");
        let storage = Self { pool };
        storage.initialize_schema()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self, StockwatchError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| StockwatchError::Storage {
                reason: e.to_string(),
            })?;

        let storage = Self { pool };
        storage.initialize_schema()?;
        Ok(storage)
    }

    pub fn initialize_schema(&self) -> Result<(), StockwatchError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| StockwatchError::Storage {
                reason: e.to_string(),
            })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e: rusqlite::Error| StockwatchError::Storage {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn get_blocking(&self, key: &str) -> Result<Option<String>, StockwatchError> {
        let read_err = |reason: String| StockwatchError::StorageRead {
            key: key.to_string(),
            reason,
        };

        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| read_err(e.to_string()))?;

        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e: rusqlite::Error| read_err(e.to_string()))
    }

    fn set_blocking(&self, key: &str, value: &str) -> Result<(), StockwatchError> {
        let write_err = |reason: String| StockwatchError::StorageWrite {
            key: key.to_string(),
            reason,
        };

        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| write_err(e.to_string()))?;

        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e: rusqlite::Error| write_err(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl StoragePort for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StockwatchError> {
        let this = self.clone();
        let key = key.to_string();
        let key_for_err = key.clone();
        tokio::task::spawn_blocking(move || this.get_blocking(&key))
            .await
            .map_err(|e| StockwatchError::StorageRead {
                key: key_for_err,
                reason: e.to_string(),
            })?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StockwatchError> {
        let this = self.clone();
        let key = key.to_string();
        let value = value.to_string();
        let key_for_err = key.clone();
        tokio::task::spawn_blocking(move || this.set_blocking(&key, &value))
            .await
            .map_err(|e| StockwatchError::StorageWrite {
                key: key_for_err,
                reason: e.to_string(),
            })?
    }
}
