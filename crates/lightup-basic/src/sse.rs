// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parser for the basic proxy.

use eventsource_stream::Eventsource;
use futures::stream::{self, StreamExt};
use lightup_core::{ChunkStream, LightupError, StreamChunk};
use tracing::debug;

use crate::types::BasicChunk;

const DONE_SENTINEL: &str = "[DONE]";

/// Parses the proxy's event stream into normalized chunks.
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
                    debug!("basic stream ended without [DONE]");
                    return Some((Ok(StreamChunk::Done), None));
                }
            }
        }
    });

    Box::pin(chunks)
}

/// Maps one `data:` payload to a chunk.
///
/// Payloads that are not JSON are forwarded as plain text.
pub fn parse_data(data: &str) -> Option<StreamChunk> {
    if data.trim().is_empty() {
        return None;
    }
    if data.trim() == DONE_SENTINEL {
        return Some(StreamChunk::Done);
    }

    let Ok(chunk) = serde_json::from_str::<BasicChunk>(data) else {
        return Some(StreamChunk::text(data));
    };
    if let Some(message) = chunk.error_message() {
        return Some(StreamChunk::error(message));
    }
    chunk
        .text()
        .filter(|text| !text.is_empty())
        .map(StreamChunk::text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_data_cases() {
        assert_eq!(parse_data(" [DONE] "), Some(StreamChunk::Done));
        assert_eq!(parse_data(r#"{"content":"x"}"#), Some(StreamChunk::text("x")));
        assert_eq!(parse_data(r#"{"content":""}"#), None);
        assert_eq!(parse_data("raw words"), Some(StreamChunk::text("raw words")));
        assert_eq!(
            parse_data(r#"{"error":"Daily limit"}"#),
            Some(StreamChunk::error("Daily limit"))
        );
    }
}
