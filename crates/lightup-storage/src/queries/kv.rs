// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value operations on the `kv_store` table.

use lightup_core::LightupError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Get the raw JSON text stored under `key`.
pub async fn get_value(db: &Database, key: &str) -> Result<Option<String>, LightupError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace the JSON text stored under `key`.
pub async fn put_value(db: &Database, key: &str, value: String) -> Result<(), LightupError> {
    let key = key.to_string();
    let now = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete `key`; returns whether a row was removed.
pub async fn delete_value(db: &Database, key: &str) -> Result<bool, LightupError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let removed = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(removed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All keys in lexical order.
pub async fn list_keys(db: &Database) -> Result<Vec<String>, LightupError> {
    db.connection()
        .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
