// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait: a JSON value per well-known key.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LightupError;
use crate::traits::adapter::PluginAdapter;

/// Key/value persistence for settings and conversation state.
///
/// Values are whole JSON documents; callers read, modify and write back.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Returns the stored value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, LightupError>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), LightupError>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), LightupError>;

    /// Lists all stored keys in lexical order.
    async fn keys(&self) -> Result<Vec<String>, LightupError>;
}

/// Reads and deserializes the value stored under `key`.
pub async fn read_json<T: DeserializeOwned>(
    storage: &dyn StorageAdapter,
    key: &str,
) -> Result<Option<T>, LightupError> {
    match storage.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and stores it under `key`.
pub async fn write_json<T: Serialize + Sync>(
    storage: &dyn StorageAdapter,
    key: &str,
    value: &T,
) -> Result<(), LightupError> {
    let value = serde_json::to_value(value)?;
    storage.set(key, value).await
}
