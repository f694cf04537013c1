// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and chunk shapes exchanged with a UI.

use std::pin::Pin;

use futures::Stream;
use lightup_core::{ChunkEnvelope, Mode, StreamChunk};
use serde::{Deserialize, Serialize};

/// A request to process selected text, or to answer a follow-up about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTextRequest {
    /// The selected text, or the question when this is a follow-up.
    pub text: String,
    pub mode: Mode,
    /// Echoed back on every chunk so a UI can route it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub is_follow_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUpContext>,
}

impl ProcessTextRequest {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode,
            id: None,
            is_follow_up: false,
            follow_up: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Turns the request into a follow-up question about `context`.
    pub fn follow_up(question: impl Into<String>, mode: Mode, context: FollowUpContext) -> Self {
        Self {
            text: question.into(),
            mode,
            id: None,
            is_follow_up: true,
            follow_up: Some(context),
        }
    }
}

/// What a follow-up question refers back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpContext {
    pub original_text: String,
    pub main_answer: String,
    #[serde(default)]
    pub previous: Vec<AnsweredQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
}

/// A chunk as delivered to a UI, with heuristic quality scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedChunk {
    #[serde(flatten)]
    pub envelope: ChunkEnvelope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl AnnotatedChunk {
    /// An unscored chunk.
    pub fn new(chunk: StreamChunk, id: Option<String>, is_follow_up: bool) -> Self {
        Self {
            envelope: ChunkEnvelope {
                chunk,
                id,
                is_follow_up,
            },
            confidence_score: None,
            relevance_score: None,
        }
    }

    pub fn chunk(&self) -> &StreamChunk {
        &self.envelope.chunk
    }

    /// The text of a `Chunk`, `None` for `Done` and `Error`.
    pub fn text(&self) -> Option<&str> {
        match &self.envelope.chunk {
            StreamChunk::Chunk { content } => Some(content),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.envelope.chunk.is_terminal()
    }
}

/// The stream returned by the processor. It never fails; errors arrive as
/// an `Error` chunk.
pub type AnnotatedStream = Pin<Box<dyn Stream<Item = AnnotatedChunk> + Send>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_minimal_json() {
        let request: ProcessTextRequest =
            serde_json::from_str(r#"{"text":"hello","mode":"explain"}"#).unwrap();
        assert_eq!(request, ProcessTextRequest::new("hello", Mode::Explain));
    }

    #[test]
    fn follow_up_request_round_trips_camel_case() {
        let request = ProcessTextRequest::follow_up(
            "why?",
            Mode::Analyze,
            FollowUpContext {
                original_text: "text".into(),
                main_answer: "answer".into(),
                previous: vec![],
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["isFollowUp"], true);
        assert_eq!(json["followUp"]["originalText"], "text");
        assert_eq!(json["followUp"]["mainAnswer"], "answer");
    }

    #[test]
    fn annotated_chunk_is_flat_on_the_wire() {
        let mut chunk = AnnotatedChunk::new(StreamChunk::text("hi"), Some("7".into()), false);
        chunk.confidence_score = Some(0.75);
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "chunk",
                "content": "hi",
                "id": "7",
                "isFollowUp": false,
                "confidenceScore": 0.75
            })
        );
    }
}
