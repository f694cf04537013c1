// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the basic proxy, retrying while it reports 503.

use std::time::Duration;

use lightup_core::{ChunkStream, LightupError};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::sse;
use crate::types::GenerateRequest;

/// How often and how patiently 503 responses are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each one after.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before attempt number `attempt` (0-based; attempt 0 has none).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        match attempt {
            0 => Duration::ZERO,
            n => self.base_delay.saturating_mul(1 << (n - 1).min(16)),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasicClient {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl BasicClient {
    pub fn new(url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, LightupError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

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
            url: url.to_string(),
            retry,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the request and parses the streamed answer.
    pub async fn stream_generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<ChunkStream, LightupError> {
        let response = self.fetch_with_retry(request).await?;
        Ok(sse::parse_sse_stream(response))
    }

    /// POSTs `request`, retrying with exponential backoff while the proxy answers 503.
    ///
    /// Any other non-success status fails immediately.
    pub async fn fetch_with_retry(
        &self,
        request: &GenerateRequest,
    ) -> Result<reqwest::Response, LightupError> {
        let attempts = self.retry.max_attempts.max(1);

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.retry.delay_before(attempt);
                warn!(attempt, delay_ms = delay.as_millis() as u64, "retrying basic request after 503");
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .json(request)
                .send()
                .await
                .map_err(|e| LightupError::Provider {
                    message: format!("Basic model request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "basic response received");

            if status.is_success() {
                return Ok(response);
            }
            if status == StatusCode::SERVICE_UNAVAILABLE && attempt + 1 < attempts {
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(LightupError::provider(error_message(status, &body)));
        }

        Err(LightupError::provider("Basic model request failed after retries"))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .or_else(|| json.get("message"))
                .and_then(|m| m.as_str().map(str::to_string))
        });
    match detail {
        Some(message) => format!("Basic model error ({}): {message}", status.as_u16()),
        None if status == StatusCode::SERVICE_UNAVAILABLE => {
            "The basic model is temporarily unavailable. Please try again shortly.".to_string()
        }
        None if body.trim().is_empty() => format!("Basic model returned {status}"),
        None => format!("Basic model returned {status}: {}", body.trim()),
    }
}
