// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed access to the well-known storage keys.
//!
//! Every reader falls back to the default when the key is absent, matching
//! how the settings blob has always been read. These work over any
//! [`StorageAdapter`], so tests can use an in-memory store.

use lightup_config::{
    IS_ENABLED_KEY, PREFERRED_MODES_KEY, SELECTED_LOCALE_KEY, SETTINGS_KEY, Settings,
    TRANSLATION_SETTINGS_KEY, TranslationSettings,
};
use lightup_core::{LightupError, Mode, StorageAdapter, read_json, write_json};
use strum::IntoEnumIterator;
use tracing::debug;

/// Locale used until the user picks one.
pub const DEFAULT_LOCALE: &str = "en";

pub async fn load_settings(storage: &dyn StorageAdapter) -> Result<Settings, LightupError> {
    Ok(read_json(storage, SETTINGS_KEY).await?.unwrap_or_default())
}

pub async fn save_settings(
    storage: &dyn StorageAdapter,
    settings: &Settings,
) -> Result<(), LightupError> {
    write_json(storage, SETTINGS_KEY, settings).await
}

/// Reads the blob, spreads `patch` over it and writes the result back.
pub async fn update_settings(
    storage: &dyn StorageAdapter,
    patch: &serde_json::Value,
) -> Result<Settings, LightupError> {
    let current = load_settings(storage).await?;
    let updated = current.merge_patch(patch)?;
    save_settings(storage, &updated).await?;
    debug!(
        keys = ?patch.as_object().map(|o| o.keys().cloned().collect::<Vec<_>>()),
        "settings updated"
    );
    Ok(updated)
}

/// Drops the stored blob so every field reads back as its default.
pub async fn reset_settings(storage: &dyn StorageAdapter) -> Result<Settings, LightupError> {
    storage.remove(SETTINGS_KEY).await?;
    Ok(Settings::default())
}

/// Modes shown in the picker; all modes when nothing is stored.
pub async fn load_preferred_modes(storage: &dyn StorageAdapter) -> Result<Vec<Mode>, LightupError> {
    Ok(read_json(storage, PREFERRED_MODES_KEY)
        .await?
        .unwrap_or_else(|| Mode::iter().collect()))
}

pub async fn save_preferred_modes(
    storage: &dyn StorageAdapter,
    modes: &[Mode],
) -> Result<(), LightupError> {
    write_json(storage, PREFERRED_MODES_KEY, &modes).await
}

pub async fn load_translation_settings(
    storage: &dyn StorageAdapter,
) -> Result<TranslationSettings, LightupError> {
    Ok(read_json(storage, TRANSLATION_SETTINGS_KEY)
        .await?
        .unwrap_or_default())
}

pub async fn save_translation_settings(
    storage: &dyn StorageAdapter,
    translation: &TranslationSettings,
) -> Result<(), LightupError> {
    write_json(storage, TRANSLATION_SETTINGS_KEY, translation).await
}

/// Global on/off switch; enabled unless explicitly turned off.
pub async fn is_enabled(storage: &dyn StorageAdapter) -> Result<bool, LightupError> {
    Ok(read_json(storage, IS_ENABLED_KEY).await?.unwrap_or(true))
}

pub async fn set_enabled(storage: &dyn StorageAdapter, enabled: bool) -> Result<(), LightupError> {
    write_json(storage, IS_ENABLED_KEY, &enabled).await
}

pub async fn selected_locale(storage: &dyn StorageAdapter) -> Result<String, LightupError> {
    Ok(read_json(storage, SELECTED_LOCALE_KEY)
        .await?
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string()))
}

pub async fn set_selected_locale(
    storage: &dyn StorageAdapter,
    locale: &str,
) -> Result<(), LightupError> {
    write_json(storage, SELECTED_LOCALE_KEY, &locale).await
}
