// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM backends (OpenAI, Gemini, xAI, local, basic).

use std::pin::Pin;

use async_trait::async_trait;
use futures::StreamExt;
use futures_core::Stream;

use crate::error::LightupError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse, StreamChunk};

/// A boxed stream of normalized chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LightupError>> + Send>>;

/// Adapter for LLM provider integrations.
///
/// Implementations only have to provide [`stream`](ProviderAdapter::stream);
/// [`complete`](ProviderAdapter::complete) collects the stream by default.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// The model a request without an override is sent to.
    fn model(&self) -> &str;

    /// Sends a request and returns a stream of normalized chunks.
    ///
    /// The stream ends with either [`StreamChunk::Done`] or [`StreamChunk::Error`].
    async fn stream(&self, request: ProviderRequest) -> Result<ChunkStream, LightupError>;

    /// Sends a request and returns the concatenated response text.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, LightupError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.model().to_string());
        let mut stream = self.stream(request).await?;
        let mut content = String::new();

        while let Some(item) = stream.next().await {
            match item? {
                StreamChunk::Chunk { content: piece } => content.push_str(&piece),
                StreamChunk::Done => break,
                StreamChunk::Error { error } => return Err(LightupError::provider(error)),
            }
        }

        Ok(ProviderResponse { content, model })
    }
}
