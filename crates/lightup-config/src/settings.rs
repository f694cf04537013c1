// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User settings persisted as a single JSON blob.
//!
//! Unlike [`LightupConfig`](crate::LightupConfig), these types tolerate
//! unknown and missing fields: anything absent falls back to its default at
//! read time, so older blobs keep loading without a migration.

use std::collections::BTreeMap;

use lightup_core::{Mode, ModelType};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Storage key of the settings blob.
pub const SETTINGS_KEY: &str = "settings";
/// Storage key of the preferred mode list.
pub const PREFERRED_MODES_KEY: &str = "preferredModes";
/// Storage key of the translation language pair.
pub const TRANSLATION_SETTINGS_KEY: &str = "translationSettings";
/// Storage key of the persisted conversation context.
pub const CONVERSATION_CONTEXT_KEY: &str = "enhancedConversationContext";
/// Storage key of the global on/off switch.
pub const IS_ENABLED_KEY: &str = "isEnabled";
/// Storage key of the interface locale.
pub const SELECTED_LOCALE_KEY: &str = "selectedLocale";

/// How much prompt augmentation the processor performs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QualityLevel {
    /// Base mode prompts only.
    Fast,
    /// Base prompts plus retrieved conversation memories.
    #[default]
    Balanced,
    /// Memories plus the enhanced system prompt with reasoning steps.
    High,
}

/// The settings blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub model_type: ModelType,
    /// OpenAI API key.
    pub api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub xai_api_key: Option<String>,
    /// Base URL of a user-hosted OpenAI-compatible server.
    pub server_url: String,
    pub openai_model: String,
    pub gemini_model: String,
    pub xai_model: String,
    pub local_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub custom_prompts: CustomPrompts,
    pub customization: Customization,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_type: ModelType::Basic,
            api_key: None,
            gemini_api_key: None,
            xai_api_key: None,
            server_url: "http://localhost:1234".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            xai_model: "grok-2-latest".to_string(),
            local_model: "local-model".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            custom_prompts: CustomPrompts::default(),
            customization: Customization::default(),
        }
    }
}

impl Settings {
    /// Applies a partial update the way the extension does: the stored object
    /// is spread, then the patch's top-level keys overwrite it.
    ///
    /// Nested objects in the patch replace their stored counterpart whole.
    pub fn merge_patch(&self, patch: &serde_json::Value) -> Result<Settings, serde_json::Error> {
        let mut current = serde_json::to_value(self)?;
        if let (Some(target), Some(source)) = (current.as_object_mut(), patch.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(current)
    }

    /// The model name used for the selected backend.
    pub fn active_model(&self) -> &str {
        match self.model_type {
            ModelType::OpenAi => &self.openai_model,
            ModelType::Gemini => &self.gemini_model,
            ModelType::Xai => &self.xai_model,
            ModelType::Local => &self.local_model,
            ModelType::Basic => "basic",
        }
    }
}

/// User overrides for the built-in prompt templates, keyed by mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomPrompts {
    pub system_prompts: BTreeMap<Mode, String>,
    /// May contain a `${text}` placeholder for the selected text.
    pub user_prompts: BTreeMap<Mode, String>,
}

/// Behavior toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customization {
    /// ISO 639-1 code the model should answer in.
    pub ai_response_language: String,
    pub quality_level: QualityLevel,
    pub enable_follow_up: bool,
    pub enable_summaries: bool,
    pub enable_entity_tracking: bool,
    /// Base font size used by the HTML export.
    pub font_size: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            ai_response_language: "en".to_string(),
            quality_level: QualityLevel::Balanced,
            enable_follow_up: true,
            enable_summaries: true,
            enable_entity_tracking: true,
            font_size: "15px".to_string(),
        }
    }
}

/// Source and target language for translate mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    /// `"auto"` lets the model detect the source language.
    pub from_language: String,
    pub to_language: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            from_language: "auto".to_string(),
            to_language: "en".to_string(),
        }
    }
}

/// Display name for an ISO 639-1 language code; unknown codes are returned as-is.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "nl" => "Dutch",
        "ru" => "Russian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "tr" => "Turkish",
        "pl" => "Polish",
        "sv" => "Swedish",
        "uk" => "Ukrainian",
        "he" => "Hebrew",
        "auto" => "the detected language",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"modelType":"gemini","geminiApiKey":"g-1"}"#).unwrap();
        assert_eq!(settings.model_type, ModelType::Gemini);
        assert_eq!(settings.gemini_api_key.as_deref(), Some("g-1"));
        assert_eq!(settings.max_tokens, 2048);
        assert_eq!(settings.customization.ai_response_language, "en");
        assert_eq!(settings.active_model(), "gemini-1.5-flash");
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let settings: Settings =
            serde_json::from_str(r#"{"modelType":"local","legacyFlag":true}"#).unwrap();
        assert_eq!(settings.model_type, ModelType::Local);
    }

    #[test]
    fn merge_patch_overwrites_top_level_keys_only() {
        let mut base = Settings::default();
        base.api_key = Some("sk-old".into());
        base.customization.enable_summaries = false;

        let patch = serde_json::json!({
            "modelType": "openai",
            "customization": {"qualityLevel": "high"}
        });
        let merged = base.merge_patch(&patch).unwrap();

        assert_eq!(merged.model_type, ModelType::OpenAi);
        assert_eq!(merged.api_key.as_deref(), Some("sk-old"));
        assert_eq!(merged.customization.quality_level, QualityLevel::High);
        // The nested object was replaced whole, so the omitted flag is back to its default.
        assert!(merged.customization.enable_summaries);
    }

    #[test]
    fn custom_prompts_are_keyed_by_mode_name() {
        let json = r#"{"customPrompts":{"userPrompts":{"summarize":"TL;DR: ${text}"}}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(
            settings.custom_prompts.user_prompts.get(&Mode::Summarize).map(String::as_str),
            Some("TL;DR: ${text}")
        );
    }

    #[test]
    fn language_names() {
        assert_eq!(language_name("fr"), "French");
        assert_eq!(language_name("xx"), "xx");
    }
}
