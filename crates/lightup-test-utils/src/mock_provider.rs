// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! so processor and memory tests never reach an external API.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use tokio::sync::Mutex;

use lightup_core::{
    AdapterType, ChunkStream, HealthStatus, LightupError, PluginAdapter, ProviderAdapter,
    ProviderRequest, StreamChunk,
};

/// What the provider does for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Stream these pieces as chunks, then `Done`.
    Chunks(Vec<String>),
    /// Stream these pieces, then an `Error` chunk.
    ErrorAfter(Vec<String>, String),
    /// Fail before any stream is produced.
    Fail(String),
}

/// A mock LLM provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a single
/// "mock response" chunk followed by `Done` is streamed.
#[derive(Clone)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
    chunk_delay: Option<Duration>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            chunk_delay: None,
        }
    }

    fn from_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Self::new()
        }
    }

    /// Create a mock provider pre-loaded with one whole-text reply per entry.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::from_replies(responses.into_iter().map(|r| MockReply::Chunks(vec![r])))
    }

    /// Create a mock provider whose first reply streams `pieces` then `Done`.
    pub fn with_chunks(pieces: &[&str]) -> Self {
        Self::from_replies([MockReply::Chunks(
            pieces.iter().map(|p| p.to_string()).collect(),
        )])
    }

    /// Sleep between streamed items, for debounce tests.
    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = Some(delay);
        self
    }

    /// Add a reply to the end of the queue.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Add a whole-text reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.push_reply(MockReply::Chunks(vec![text.into()])).await;
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Chunks(vec!["mock response".to_string()]))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
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
impl ProviderAdapter for MockProvider {
    fn model(&self) -> &str {
        "mock-model"
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ChunkStream, LightupError> {
        self.requests.lock().await.push(request);

        let items: Vec<StreamChunk> = match self.next_reply().await {
            MockReply::Fail(message) => return Err(LightupError::provider(message)),
            MockReply::Chunks(pieces) => pieces
                .into_iter()
                .map(StreamChunk::text)
                .chain(std::iter::once(StreamChunk::Done))
                .collect(),
            MockReply::ErrorAfter(pieces, error) => pieces
                .into_iter()
                .map(StreamChunk::text)
                .chain(std::iter::once(StreamChunk::error(error)))
                .collect(),
        };

        let delay = self.chunk_delay;
        let stream = stream::iter(items).then(move |chunk| async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, LightupError>(chunk)
        });
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest::single(Some("system".into()), "hello")
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.content, "mock response");
        assert_eq!(resp.model, "mock-model");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider = MockProvider::with_responses(vec!["first".into(), "second".into()]);
        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(request()).await.unwrap().content, "second");
        assert_eq!(
            provider.complete(request()).await.unwrap().content,
            "mock response"
        );
        assert_eq!(provider.call_count().await, 3);
    }

    #[tokio::test]
    async fn scripted_chunks_end_with_done() {
        let provider = MockProvider::with_chunks(&["Hello ", "world"]);
        let chunks: Vec<StreamChunk> = provider
            .stream(request())
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(
            chunks,
            vec![
                StreamChunk::text("Hello "),
                StreamChunk::text("world"),
                StreamChunk::Done
            ]
        );
    }

    #[tokio::test]
    async fn failures_surface_as_errors() {
        let provider = MockProvider::new();
        provider.push_reply(MockReply::Fail("no key".into())).await;
        provider
            .push_reply(MockReply::ErrorAfter(vec!["par".into()], "quota".into()))
            .await;

        assert_eq!(
            provider.complete(request()).await.unwrap_err().to_string(),
            "no key"
        );
        assert_eq!(
            provider.complete(request()).await.unwrap_err().to_string(),
            "quota"
        );
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockProvider::new();
        provider.complete(request()).await.unwrap();
        let seen = provider.requests().await;
        assert_eq!(seen[0].system_prompt.as_deref(), Some("system"));
    }
}
