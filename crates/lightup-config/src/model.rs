// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for LightUp.
//!
//! All sections use `#[serde(deny_unknown_fields)]` so a typo in
//! `lightup.toml` fails at startup with a suggestion instead of being ignored.

use serde::{Deserialize, Serialize};

/// Top-level LightUp configuration.
///
/// Every section is optional and defaults to the values the extension ships with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LightupConfig {
    /// Process-wide settings (logging).
    #[serde(default)]
    pub app: AppConfig,

    /// Where settings and conversation state are persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Conversation buffer sizes and summarization thresholds.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Upstream endpoints and HTTP behavior.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Daily action limit for the hosted "basic" model.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Follow-up streaming behavior.
    #[serde(default)]
    pub follow_up: FollowUpConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("lightup").join("lightup.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("lightup.db"))
        .display()
        .to_string()
}

/// Conversation memory tuning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Window length that triggers a trim.
    #[serde(default = "default_max_buffer_size")]
    pub max_buffer_size: usize,

    /// Window length a trim cuts back to.
    #[serde(default = "default_context_window_size")]
    pub context_window_size: usize,

    /// Window length (and number of unsummarized turns) that triggers a summary.
    #[serde(default = "default_summary_trigger_size")]
    pub summary_trigger_size: usize,

    /// Maximum number of summaries kept in long-term memory.
    #[serde(default = "default_long_term_limit")]
    pub long_term_limit: usize,

    /// Maximum number of results returned by relevance retrieval.
    #[serde(default = "default_max_relevant_results")]
    pub max_relevant_results: usize,

    /// Token cap for the summarization call.
    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: default_max_buffer_size(),
            context_window_size: default_context_window_size(),
            summary_trigger_size: default_summary_trigger_size(),
            long_term_limit: default_long_term_limit(),
            max_relevant_results: default_max_relevant_results(),
            summary_max_tokens: default_summary_max_tokens(),
        }
    }
}

fn default_max_buffer_size() -> usize {
    20
}

fn default_context_window_size() -> usize {
    10
}

fn default_summary_trigger_size() -> usize {
    15
}

fn default_long_term_limit() -> usize {
    50
}

fn default_max_relevant_results() -> usize {
    5
}

fn default_summary_max_tokens() -> u32 {
    300
}

/// Upstream provider endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// OpenAI API base (the `/chat/completions` path is appended).
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Gemini API host.
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// xAI API base.
    #[serde(default = "default_xai_base_url")]
    pub xai_base_url: String,

    /// Full URL of the hosted "basic" generation endpoint.
    #[serde(default = "default_basic_url")]
    pub basic_url: String,

    /// Overall timeout for a single streaming request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Total attempts the basic proxy gets when it answers 503.
    #[serde(default = "default_basic_max_attempts")]
    pub basic_max_attempts: u32,

    /// Delay before the first basic retry; doubles on each further attempt.
    #[serde(default = "default_basic_retry_base_ms")]
    pub basic_retry_base_ms: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai_base_url: default_openai_base_url(),
            gemini_base_url: default_gemini_base_url(),
            xai_base_url: default_xai_base_url(),
            basic_url: default_basic_url(),
            request_timeout_secs: default_request_timeout_secs(),
            basic_max_attempts: default_basic_max_attempts(),
            basic_retry_base_ms: default_basic_retry_base_ms(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_xai_base_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_basic_url() -> String {
    "https://boimaginations.com/api/v1/basic/generate".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_basic_max_attempts() -> u32 {
    3
}

fn default_basic_retry_base_ms() -> u64 {
    1000
}

/// Daily action limit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Whether requests to the basic model consume daily actions.
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,

    /// Actions allowed per UTC day.
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            daily_limit: default_daily_limit(),
        }
    }
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_daily_limit() -> u32 {
    50
}

/// Follow-up streaming configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FollowUpConfig {
    /// Debounce window used to batch streamed text before it is flushed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    80
}
