// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management, PRAGMA setup and migrations.
//!
//! All statements run on tokio-rusqlite's single background thread, which
//! serializes writes. Do NOT open additional connections for writes.

use std::path::Path;

use lightup_core::LightupError;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::migrations::{HISTORY_TABLE, run_migrations};

/// Handle to the single SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database file and brings the schema up to date.
    pub async fn open(path: &str) -> Result<Self, LightupError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LightupError::Storage {
                    source: Box::new(e),
                })?;
        }

        let conn = Connection::open(path).await.map_err(map_tr_err)?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            let mode: String =
                conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = 5000;")?;
            tracing::debug!(journal_mode = %mode, "sqlite pragmas applied");
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let db = Self { conn };
        let applied = db.migrate().await?;
        info!(path, applied, "database opened");
        Ok(db)
    }

    /// Opens a private in-memory database (tests and dry runs).
    pub async fn open_in_memory() -> Result<Self, LightupError> {
        let conn = Connection::open_in_memory().await.map_err(map_tr_err)?;
        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// The underlying connection; every query goes through `call()` on it.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs pending migrations and returns how many were applied.
    async fn migrate(&self) -> Result<usize, LightupError> {
        self.conn
            .call(run_migrations)
            .await
            .map_err(map_tr_err)
            .inspect(|applied| debug!(applied, "schema migrations checked"))
    }

    /// Returns the latest applied migration version, 0 on a fresh file.
    pub async fn schema_version(&self) -> Result<i64, LightupError> {
        self.conn
            .call(|conn| -> Result<i64, rusqlite::Error> {
                let sql = format!("SELECT COALESCE(MAX(version), 0) FROM {HISTORY_TABLE}");
                conn.query_row(&sql, [], |row| row.get(0))
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Wraps a tokio-rusqlite (or rusqlite) error as a storage error.
pub fn map_tr_err<E>(err: E) -> LightupError
where
    E: std::error::Error + Send + Sync + 'static,
{
    LightupError::Storage {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_database_is_fully_migrated() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(
            db.schema_version().await.unwrap(),
            crate::migrations::embedded_count() as i64
        );
    }

    #[tokio::test]
    async fn reopening_a_file_applies_nothing_new() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lightup.db");
        let path = path.to_str().unwrap();

        let first = Database::open(path).await.unwrap();
        assert_eq!(first.schema_version().await.unwrap(), 2);
        drop(first);

        let second = Database::open(path).await.unwrap();
        assert_eq!(second.migrate().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn migration_history_lists_every_table() {
        let db = Database::open_in_memory().await.unwrap();
        let (names, tables) = db
            .connection()
            .call(|conn| -> Result<(Vec<String>, Vec<String>), rusqlite::Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT name FROM {HISTORY_TABLE} ORDER BY version"
                ))?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' \
                     AND name IN ('kv_store', 'rate_limit_usage') ORDER BY name",
                )?;
                let tables = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok((names, tables))
            })
            .await
            .unwrap();

        assert_eq!(names, vec!["kv_store", "rate_limit_usage"]);
        assert_eq!(tables, vec!["kv_store", "rate_limit_usage"]);
    }
}
