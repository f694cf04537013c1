// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the typed storage accessors over SQLite.

use lightup_config::{QualityLevel, StorageConfig, TranslationSettings};
use lightup_core::{Mode, ModelType, StorageAdapter};
use lightup_storage::SqliteStore;
use lightup_storage::accessors::{
    is_enabled, load_preferred_modes, load_settings, load_translation_settings, reset_settings,
    save_preferred_modes, save_translation_settings, selected_locale, set_enabled,
    set_selected_locale, update_settings,
};
use serde_json::json;

async fn temp_store() -> (tempfile::TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("lightup.db").display().to_string(),
    };
    let store = SqliteStore::open(&config).await.unwrap();
    (dir, store)
}

#[tokio::test]
async fn fresh_store_reads_defaults() {
    let (_dir, store) = temp_store().await;

    let settings = load_settings(&store).await.unwrap();
    assert_eq!(settings.model_type, ModelType::Basic);
    assert_eq!(settings.customization.quality_level, QualityLevel::Balanced);

    assert!(is_enabled(&store).await.unwrap());
    assert_eq!(selected_locale(&store).await.unwrap(), "en");
    assert_eq!(load_preferred_modes(&store).await.unwrap().len(), 5);
    assert_eq!(
        load_translation_settings(&store).await.unwrap(),
        TranslationSettings::default()
    );
    assert!(store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_settings_merges_patch_over_stored_blob() {
    let (_dir, store) = temp_store().await;

    update_settings(&store, &json!({"modelType": "openai", "apiKey": "sk-1"}))
        .await
        .unwrap();
    let updated = update_settings(&store, &json!({"openaiModel": "gpt-4o"}))
        .await
        .unwrap();

    assert_eq!(updated.model_type, ModelType::OpenAi);
    assert_eq!(updated.api_key.as_deref(), Some("sk-1"));
    assert_eq!(updated.openai_model, "gpt-4o");
    assert_eq!(load_settings(&store).await.unwrap(), updated);
}

#[tokio::test]
async fn unknown_fields_in_stored_blob_are_tolerated() {
    let (_dir, store) = temp_store().await;
    store
        .set(
            "settings",
            json!({"modelType": "gemini", "legacyFlag": 1, "customization": {"fontSize": "18px"}}),
        )
        .await
        .unwrap();

    let settings = load_settings(&store).await.unwrap();
    assert_eq!(settings.model_type, ModelType::Gemini);
    assert_eq!(settings.customization.font_size, "18px");
    assert!(settings.customization.enable_summaries);
}

#[tokio::test]
async fn reset_restores_defaults() {
    let (_dir, store) = temp_store().await;
    update_settings(&store, &json!({"maxTokens": 64})).await.unwrap();

    let reset = reset_settings(&store).await.unwrap();
    assert_eq!(reset.max_tokens, 2048);
    assert_eq!(load_settings(&store).await.unwrap().max_tokens, 2048);
}

#[tokio::test]
async fn small_keys_round_trip() {
    let (_dir, store) = temp_store().await;

    set_enabled(&store, false).await.unwrap();
    set_selected_locale(&store, "de").await.unwrap();
    save_preferred_modes(&store, &[Mode::Translate, Mode::Explain])
        .await
        .unwrap();
    save_translation_settings(
        &store,
        &TranslationSettings {
            from_language: "fr".into(),
            to_language: "ja".into(),
        },
    )
    .await
    .unwrap();

    assert!(!is_enabled(&store).await.unwrap());
    assert_eq!(selected_locale(&store).await.unwrap(), "de");
    assert_eq!(
        load_preferred_modes(&store).await.unwrap(),
        vec![Mode::Translate, Mode::Explain]
    );
    assert_eq!(
        load_translation_settings(&store).await.unwrap().to_language,
        "ja"
    );
    assert_eq!(
        store.get("preferredModes").await.unwrap(),
        Some(json!(["translate", "explain"]))
    );
}
