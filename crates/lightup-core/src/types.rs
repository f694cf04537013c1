// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the memory, prompt, provider and agent crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which prompt template a request uses.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Explain,
    Summarize,
    Analyze,
    Translate,
    Free,
}

/// The upstream LLM backend selected in settings.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelType {
    #[default]
    Basic,
    #[strum(serialize = "openai")]
    OpenAi,
    Gemini,
    Xai,
    Local,
}

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A conversation turn as tracked by the memory manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
    /// Heuristic importance in `0.0..=10.0`, assigned when the message enters the buffer.
    #[serde(default)]
    pub importance: f64,
}

impl Message {
    /// Creates a message stamped with the current time and no importance yet.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            importance: 0.0,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// The uniform shape every provider normalizes its streaming output into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamChunk {
    /// A piece of generated text.
    Chunk { content: String },
    /// The stream finished normally.
    Done,
    /// The stream failed; no further chunks follow.
    Error { error: String },
}

impl StreamChunk {
    pub fn text(content: impl Into<String>) -> Self {
        StreamChunk::Chunk {
            content: content.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        StreamChunk::Error {
            error: error.into(),
        }
    }

    /// Returns true for `Done` and `Error`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamChunk::Chunk { .. })
    }
}

/// A [`StreamChunk`] tagged with the request it belongs to, as delivered to a UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkEnvelope {
    #[serde(flatten)]
    pub chunk: StreamChunk,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub is_follow_up: bool,
}

/// A single message sent to an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: Role,
    pub content: String,
}

impl ProviderMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A provider-agnostic completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Model override; `None` uses the provider's configured model.
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub messages: Vec<ProviderMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderRequest {
    /// A single-turn request with an optional system prompt.
    pub fn single(system_prompt: Option<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            system_prompt,
            messages: vec![ProviderMessage::user(user_prompt)],
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// A fully collected provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub content: String,
    pub model: String,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Provider,
    Storage,
}
