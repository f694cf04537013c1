// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lightup settings` command implementation.

use lightup_config::diagnostic::suggest_key;
use lightup_core::{LightupError, Mode};
use lightup_storage::accessors::{
    is_enabled, load_preferred_modes, load_settings, load_translation_settings, reset_settings,
    save_preferred_modes, save_translation_settings, selected_locale, set_enabled,
    set_selected_locale, update_settings,
};
use serde_json::{Map, Value, json};

use crate::SettingsCommands;
use crate::runtime::Runtime;

const SECRET_KEYS: &[&str] = &["apiKey", "geminiApiKey", "xaiApiKey"];

pub async fn run_settings(runtime: &Runtime, action: SettingsCommands) -> Result<(), LightupError> {
    let storage = runtime.storage();
    match action {
        SettingsCommands::Show { reveal } => {
            let mut settings = serde_json::to_value(load_settings(storage).await?)?;
            if !reveal {
                mask_secrets(&mut settings);
            }
            let overview = json!({
                "isEnabled": is_enabled(storage).await?,
                "selectedLocale": selected_locale(storage).await?,
                "preferredModes": load_preferred_modes(storage).await?,
                "translationSettings": load_translation_settings(storage).await?,
                "settings": settings,
            });
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        SettingsCommands::Set { assignments } => {
            let current = serde_json::to_value(load_settings(storage).await?)?;
            let patch = build_patch(&current, &assignments)?;
            let updated = update_settings(storage, &patch).await?;
            println!(
                "settings updated (model: {} / {})",
                updated.model_type,
                updated.active_model()
            );
        }
        SettingsCommands::Reset => {
            reset_settings(storage).await?;
            println!("settings reset to defaults");
        }
        SettingsCommands::Enable => {
            set_enabled(storage, true).await?;
            println!("lightup enabled");
        }
        SettingsCommands::Disable => {
            set_enabled(storage, false).await?;
            println!("lightup disabled");
        }
        SettingsCommands::Translate { from, to } => {
            let mut translation = load_translation_settings(storage).await?;
            if let Some(from) = from {
                translation.from_language = from;
            }
            if let Some(to) = to {
                translation.to_language = to;
            }
            save_translation_settings(storage, &translation).await?;
            println!(
                "translating {} -> {}",
                translation.from_language, translation.to_language
            );
        }
        SettingsCommands::Locale { locale } => {
            set_selected_locale(storage, &locale).await?;
            println!("locale set to {locale}");
        }
        SettingsCommands::Modes { modes } => {
            let modes = dedup_modes(modes);
            save_preferred_modes(storage, &modes).await?;
            let names: Vec<String> = modes.iter().map(Mode::to_string).collect();
            println!("preferred modes: {}", names.join(", "));
        }
    }
    Ok(())
}

fn mask_secrets(settings: &mut Value) {
    let Some(object) = settings.as_object_mut() else {
        return;
    };
    for key in SECRET_KEYS {
        if let Some(Value::String(secret)) = object.get_mut(*key) {
            *secret = mask(secret);
        }
    }
}

/// Keeps the last four characters of longer secrets.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

fn dedup_modes(modes: Vec<Mode>) -> Vec<Mode> {
    let mut unique = Vec::with_capacity(modes.len());
    for mode in modes {
        if !unique.contains(&mode) {
            unique.push(mode);
        }
    }
    unique
}

/// Turns CLI assignments into a top-level settings patch.
///
/// Accepts a single JSON object, or `key=value` pairs where `key` may be a
/// dotted path such as `customization.qualityLevel`. Values that parse as
/// JSON are used as such, anything else as a string. Nested objects are
/// copied from `current` first, since the patch replaces top-level keys whole.
fn build_patch(current: &Value, assignments: &[String]) -> Result<Value, LightupError> {
    if let [single] = assignments
        && single.trim_start().starts_with('{')
    {
        let patch: Value = serde_json::from_str(single)?;
        if let Some(object) = patch.as_object() {
            for key in object.keys() {
                check_key(current, &[key.as_str()])?;
            }
        }
        return Ok(patch);
    }

    let mut patch = Map::new();
    for assignment in assignments {
        let (path, raw) = assignment.split_once('=').ok_or_else(|| {
            LightupError::Config(format!("expected key=value, got `{assignment}`"))
        })?;
        let segments: Vec<&str> = path.trim().split('.').collect();
        check_key(current, &segments)?;

        let value = serde_json::from_str(raw.trim())
            .unwrap_or_else(|_| Value::String(raw.trim().to_string()));

        let top = segments[0];
        let entry = patch
            .entry(top.to_string())
            .or_insert_with(|| current.get(top).cloned().unwrap_or(Value::Null));
        set_path(entry, &segments[1..], value);
    }
    Ok(Value::Object(patch))
}

/// Rejects keys the settings blob does not have, suggesting a close match.
fn check_key(current: &Value, segments: &[&str]) -> Result<(), LightupError> {
    let mut node = current;
    let mut walked = Vec::new();
    for segment in segments {
        let Some(object) = node.as_object() else {
            // Below a non-object (e.g. a map of custom prompts being created).
            return Ok(());
        };
        match object.get(*segment) {
            Some(child) => node = child,
            None if walked.first() == Some(&"customPrompts") => return Ok(()),
            None => {
                let valid: Vec<&str> = object.keys().map(String::as_str).collect();
                let hint = suggest_key(segment, &valid)
                    .map(|s| format!(", did you mean `{s}`?"))
                    .unwrap_or_default();
                return Err(LightupError::Config(format!(
                    "unknown setting `{}`{hint}",
                    segments.join(".")
                )));
            }
        }
        walked.push(*segment);
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        *target = value;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(object) = target {
        let child = object.entry(first.to_string()).or_insert(Value::Null);
        set_path(child, rest, value);
    }
}
