// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for OpenAI-compatible streaming responses.
//!
//! Converts a reqwest response byte stream into normalized [`StreamChunk`]s
//! using the `eventsource-stream` crate for SSE protocol compliance. The
//! stream always ends with exactly one terminal chunk.

use eventsource_stream::Eventsource;
use futures::stream::{self, StreamExt};
use lightup_core::{ChunkStream, LightupError, StreamChunk};
use tracing::{debug, warn};

use crate::types::ChatChunk;

/// Sentinel payload that ends an OpenAI stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Parses a streaming chat completion response into normalized chunks.
///
/// `[DONE]` or the end of the body yields [`StreamChunk::Done`]; an error
/// object inside the stream yields [`StreamChunk::Error`]. Payloads that do
/// not parse are skipped.
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
                    debug!("stream ended without [DONE]");
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
    if data == DONE_SENTINEL {
        return Some(StreamChunk::Done);
    }

    let chunk: ChatChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            warn!(error = %e, "skipping unparsable stream payload");
            return None;
        }
    };

    if let Some(error) = chunk.error {
        return Some(StreamChunk::error(error.message));
    }

    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(StreamChunk::text)
}
