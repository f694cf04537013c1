// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response shapes of the basic proxy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub mode: String,
    pub system_prompt: String,
    pub stream: bool,
    pub preferred_language: String,
}

/// One `data:` payload. The proxy has shipped several shapes over time, so
/// every text-bearing field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicChunk {
    #[serde(default)]
    pub choices: Vec<BasicChoice>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicChoice {
    #[serde(default)]
    pub delta: Option<BasicDelta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl BasicChunk {
    /// Text carried by this payload, whichever field it arrived in.
    pub fn text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .or(self.content)
            .or(self.text)
    }

    /// Error description, if the payload reports one.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::String(message) => Some(message.clone()),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
