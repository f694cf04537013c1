// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for LightUp.
//!
//! Streams from `v1beta/models/{model}:streamGenerateContent?alt=sse` and
//! normalizes `candidates[].content.parts[].text` into [`StreamChunk`]s.
//!
//! [`StreamChunk`]: lightup_core::StreamChunk

pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lightup_config::{ProvidersConfig, Settings};
use lightup_core::{
    AdapterType, ChunkStream, HealthStatus, LightupError, PluginAdapter, ProviderAdapter,
    ProviderRequest, Role,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, info};

use crate::types::{
    ApiErrorResponse, Content, GenerateRequest, GenerationConfig, Part, SystemInstruction,
};

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider bound to one API host and model.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Builds the provider from user settings and endpoint config.
    ///
    /// The key comes from `geminiApiKey`, then `GEMINI_API_KEY`.
    pub fn from_settings(
        settings: &Settings,
        providers: &ProvidersConfig,
    ) -> Result<Self, LightupError> {
        let api_key = resolve_api_key(settings.gemini_api_key.as_deref())?;
        let provider = Self::new(
            &providers.gemini_base_url,
            &api_key,
            &settings.gemini_model,
            Duration::from_secs(providers.request_timeout_secs),
        )?;
        info!(model = %provider.model, "gemini provider initialized");
        Ok(provider)
    }

    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, LightupError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| LightupError::Config(format!("invalid Gemini API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LightupError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Streaming endpoint for `model`.
    pub fn stream_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:streamGenerateContent?alt=sse",
            self.base_url
        )
    }
}

/// Converts a [`ProviderRequest`] into Gemini's request shape.
///
/// Assistant turns become `model`; the system prompt moves to `systemInstruction`.
pub fn to_generate_request(request: &ProviderRequest) -> GenerateRequest {
    let contents = request
        .messages
        .iter()
        .map(|m| Content {
            role: Some(
                match m.role {
                    Role::Assistant => "model",
                    Role::User | Role::System => "user",
                }
                .to_string(),
            ),
            parts: vec![Part {
                text: Some(m.content.clone()),
            }],
        })
        .collect();

    GenerateRequest {
        contents,
        system_instruction: request
            .system_prompt
            .as_ref()
            .map(|prompt| SystemInstruction {
                parts: vec![Part {
                    text: Some(prompt.clone()),
                }],
            }),
        generation_config: GenerationConfig {
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
        },
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, LightupError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LightupError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ChunkStream, LightupError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let url = self.stream_url(model);
        let body = to_generate_request(&request);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LightupError::Provider {
                message: format!("Gemini request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "gemini response received");
        if status.is_success() {
            return Ok(sse::parse_sse_stream(response));
        }

        let text = response.text().await.unwrap_or_default();
        Err(LightupError::provider(error_message(status, &text)))
    }
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Gemini API error ({}): {}",
            status.as_u16(),
            api_err.error.message
        ),
        Err(_) if body.trim().is_empty() => format!("Gemini API returned {status}"),
        Err(_) => format!("Gemini API returned {status}: {}", body.trim()),
    }
}

fn resolve_api_key(configured: Option<&str>) -> Result<String, LightupError> {
    if let Some(key) = configured
        && !key.trim().is_empty()
    {
        return Ok(key.trim().to_string());
    }
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(LightupError::Config(format!(
            "Gemini API key not found. Add it in settings or set {API_KEY_ENV}."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightup_core::ProviderMessage;

    #[test]
    fn assistant_turns_map_to_model_role() {
        let mut request = ProviderRequest::single(Some("sys".into()), "second");
        request.messages.insert(0, ProviderMessage::assistant("first"));
        let body = to_generate_request(&request);

        let roles: Vec<_> = body
            .contents
            .iter()
            .map(|c| c.role.as_deref().unwrap())
            .collect();
        assert_eq!(roles, vec!["model", "user"]);
        assert!(body.system_instruction.is_some());
        assert_eq!(body.generation_config.max_output_tokens, 2048);
    }

    #[test]
    fn url_contains_model_and_sse_flag() {
        let provider = GeminiProvider::new(
            "https://generativelanguage.googleapis.com/",
            "k",
            "gemini-1.5-flash",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            provider.stream_url("gemini-1.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn settings_key_is_preferred() {
        assert_eq!(resolve_api_key(Some("g-key")).unwrap(), "g-key");
    }

    #[test]
    fn error_message_prefers_json_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::BAD_REQUEST, body),
            "Gemini API error (400): API key not valid"
        );
    }
}
