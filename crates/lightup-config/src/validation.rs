// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::LightupConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Checks semantic constraints serde cannot express.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &LightupConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        fail(format!(
            "app.log_level `{}` must be one of: {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let memory = &config.memory;
    for (name, value) in [
        ("memory.max_buffer_size", memory.max_buffer_size),
        ("memory.context_window_size", memory.context_window_size),
        ("memory.summary_trigger_size", memory.summary_trigger_size),
        ("memory.long_term_limit", memory.long_term_limit),
        ("memory.max_relevant_results", memory.max_relevant_results),
    ] {
        if value == 0 {
            fail(format!("{name} must be at least 1"));
        }
    }

    if memory.context_window_size > memory.max_buffer_size {
        fail(format!(
            "memory.context_window_size ({}) must not exceed memory.max_buffer_size ({})",
            memory.context_window_size, memory.max_buffer_size
        ));
    }

    // The window never grows past max_buffer_size, so a larger trigger would never fire.
    if memory.summary_trigger_size > memory.max_buffer_size {
        fail(format!(
            "memory.summary_trigger_size ({}) must not exceed memory.max_buffer_size ({})",
            memory.summary_trigger_size, memory.max_buffer_size
        ));
    }

    let providers = &config.providers;
    for (name, url) in [
        ("providers.openai_base_url", &providers.openai_base_url),
        ("providers.gemini_base_url", &providers.gemini_base_url),
        ("providers.xai_base_url", &providers.xai_base_url),
        ("providers.basic_url", &providers.basic_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            fail(format!("{name} `{url}` must be an http(s) URL"));
        }
    }

    if providers.request_timeout_secs == 0 {
        fail("providers.request_timeout_secs must be at least 1".to_string());
    }

    if providers.basic_max_attempts == 0 {
        fail("providers.basic_max_attempts must be at least 1".to_string());
    }

    if config.rate_limit.enabled && config.rate_limit.daily_limit == 0 {
        fail("rate_limit.daily_limit must be at least 1 when rate limiting is enabled".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
