// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible `/chat/completions` endpoints.

use std::time::Duration;

use lightup_core::{ChunkStream, LightupError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::sse;
use crate::types::{ApiErrorResponse, ChatRequest};

/// HTTP client bound to one API base URL.
///
/// Does not retry; a failed request surfaces as an error immediately.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    completions_url: String,
    /// Used as the prefix of error messages, e.g. "OpenAI".
    label: String,
}

impl ChatClient {
    /// Creates a client for `base_url` (the `/chat/completions` path is appended).
    ///
    /// `api_key` becomes a bearer token; local servers may run without one.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
        label: impl Into<String>,
    ) -> Result<Self, LightupError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                LightupError::Config(format!("invalid API key header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

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
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            label: label.into(),
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    /// Sends a streaming request and returns the normalized chunk stream.
    pub async fn stream_chat(&self, request: &ChatRequest) -> Result<ChunkStream, LightupError> {
        let mut req = request.clone();
        req.stream = true;

        let response = self
            .client
            .post(&self.completions_url)
            .json(&req)
            .send()
            .await
            .map_err(|e| LightupError::Provider {
                message: format!("{} request failed: {e}", self.label),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(
            status = %status,
            model = %req.model,
            url = %self.completions_url,
            "streaming response received"
        );

        if status.is_success() {
            return Ok(sse::parse_sse_stream(response));
        }

        let body = response.text().await.unwrap_or_default();
        Err(LightupError::provider(error_message(&self.label, status, &body)))
    }
}

/// Best-effort message from an error body; falls back to the raw text.
pub fn error_message(label: &str, status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "{label} API error ({}): {}",
            status.as_u16(),
            api_err.error.message
        ),
        Err(_) if body.trim().is_empty() => format!("{label} API returned {status}"),
        Err(_) => format!("{label} API returned {status}: {}", body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use futures::StreamExt;
    use lightup_core::StreamChunk;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            max_tokens: 64,
            temperature: 0.7,
            stream: false,
        }
    }

    fn test_client(base_url: &str, key: Option<&str>) -> ChatClient {
        ChatClient::new(base_url, key, Duration::from_secs(5), "OpenAI").unwrap()
    }

    #[tokio::test]
    async fn sends_bearer_token_and_stream_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({"stream": true, "model": "gpt-4o-mini"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string("data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\ndata: [DONE]\n\n"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/v1/", server.uri()), Some("sk-test"));
        let chunks: Vec<StreamChunk> = client
            .stream_chat(&test_request())
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(chunks, vec![StreamChunk::text("ok"), StreamChunk::Done]);
    }

    #[tokio::test]
    async fn error_body_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("sk-test"));
        let err = client.stream_chat(&test_request()).await.err().unwrap();
        assert_eq!(
            err.to_string(),
            "OpenAI API error (429): You exceeded your current quota"
        );
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), None);
        let err = client.stream_chat(&test_request()).await.err().unwrap();
        assert!(err.to_string().ends_with("bad gateway"), "got: {err}");
    }
}
