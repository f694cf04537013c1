// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for LightUp.

use thiserror::Error;

/// The primary error type used across all LightUp crates.
#[derive(Debug, Error)]
pub enum LightupError {
    /// Configuration errors (invalid TOML, missing API keys, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM provider errors (HTTP failure, malformed stream, API error body).
    #[error("{message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The daily action limit has been reached.
    #[error("{message}")]
    RateLimited { message: String },

    /// JSON (de)serialization of a stored or transmitted value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LightupError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        LightupError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
