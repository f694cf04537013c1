// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parser for Gemini's `alt=sse` streaming responses.
//!
//! Gemini sends no end sentinel; the end of the body is the end of the answer.

use eventsource_stream::Eventsource;
use futures::stream::{self, StreamExt};
use lightup_core::{ChunkStream, LightupError, StreamChunk};
use tracing::{debug, warn};

use crate::types::GenerateResponse;

/// Parses a streaming Gemini response into normalized chunks.
pub fn parse_sse_stream(response: reqwest::Response) -> ChunkStream {
    let events = Box::pin(response.bytes_stream().eventsource());

    let chunks = stream::unfold(Some(events), |state| async move {
        let Some(mut events) = state else {
            return None;
        };
        loop {
            match events.next().await {
                Some(Ok(event)) => {
                    if let Some(chunk) = parse_data(&event.data) {
                        let rest = (!chunk.is_terminal()).then_some(events);
                        return Some((Ok(chunk), rest));
                    }
                }
                Some(Err(e)) => {
                    let err = LightupError::provider(format!("SSE stream error: {e}"));
                    return Some((Err(err), None));
                }
                None => {
                    debug!("gemini stream finished");
                    return Some((Ok(StreamChunk::Done), None));
                }
            }
        }
    });

    Box::pin(chunks)
}

/// Maps one `data:` payload to a chunk; `None` means nothing to emit.
pub fn parse_data(data: &str) -> Option<StreamChunk> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }

    let response: GenerateResponse = match serde_json::from_str(data) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "skipping unparsable gemini payload");
            return None;
        }
    };

    if let Some(error) = response.error {
        return Some(StreamChunk::error(format!("Gemini API error: {}", error.message)));
    }
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Some(StreamChunk::error(format!(
            "Gemini blocked the prompt ({reason})"
        )));
    }

    let text = response.text();
    (!text.is_empty()).then(|| StreamChunk::text(text))
}
