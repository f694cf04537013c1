// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration and user settings for LightUp.
//!
//! Two layers live here:
//!
//! - [`LightupConfig`]: operator configuration read from TOML files and
//!   `LIGHTUP_*` environment variables, strictly validated.
//! - [`Settings`]: the user's settings blob as persisted in storage,
//!   tolerant of missing and unknown fields.
//!
//! ```no_run
//! use lightup_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("buffer size: {}", config.memory.max_buffer_size);
//! ```

pub mod appearance;
pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod settings;
pub mod validation;

pub use appearance::{FontSizeMapping, create_font_size_mapping};
pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AppConfig, FollowUpConfig, LightupConfig, MemoryConfig, ProvidersConfig, RateLimitConfig,
    StorageConfig,
};
pub use settings::{
    CONVERSATION_CONTEXT_KEY, CustomPrompts, Customization, IS_ENABLED_KEY, PREFERRED_MODES_KEY,
    QualityLevel, SELECTED_LOCALE_KEY, SETTINGS_KEY, Settings, TRANSLATION_SETTINGS_KEY,
    TranslationSettings, language_name,
};

/// Loads configuration from the standard hierarchy and validates it.
pub fn load_and_validate() -> Result<LightupConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Loads configuration from a TOML string and validates it.
pub fn load_and_validate_str(toml_content: &str) -> Result<LightupConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Loads configuration from an explicit file and validates it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<LightupConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let display = std::fs::canonicalize(&path)
                .unwrap_or(path)
                .display()
                .to_string();
            Some((display, content))
        })
        .collect()
}
