// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tracing::debug;

use lightup_config::StorageConfig;
use lightup_core::{AdapterType, HealthStatus, LightupError, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed key/value store.
///
/// Values are kept as JSON text; each `set` replaces the whole document.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens the database at the configured path.
    pub async fn open(config: &StorageConfig) -> Result<Self, LightupError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "sqlite store ready");
        Ok(Self { db })
    }

    /// Wraps an already-open database (shared with the rate limiter).
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, LightupError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LightupError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, LightupError> {
        match queries::kv::get_value(&self.db, key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), LightupError> {
        let text = serde_json::to_string(&value)?;
        queries::kv::put_value(&self.db, key, text).await?;
        debug!(key, "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LightupError> {
        let removed = queries::kv::delete_value(&self.db, key).await?;
        debug!(key, removed, "removed value");
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, LightupError> {
        queries::kv::list_keys(&self.db).await
    }
}
