// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up questions about an answered request.

use std::time::Duration;

use futures::StreamExt;
use lightup_core::{LightupError, Mode, StreamChunk};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coalesce::coalesce_chunks;
use crate::export::ConversationExport;
use crate::processor::EnhancedProcessor;
use crate::request::{
    AnnotatedChunk, AnnotatedStream, AnsweredQuestion, FollowUpContext, ProcessTextRequest,
};

/// Default debounce window for streamed follow-up text.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(80);

/// One follow-up question and its (possibly partial) answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpQA {
    /// Milliseconds since the Unix epoch when the question was asked.
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub is_complete: bool,
    /// Set once the exchange has been recorded in conversation memory.
    pub history_updated: bool,
}

/// The original request, its answer and every follow-up asked about it.
///
/// Held in memory only.
pub struct FollowUpSession {
    processor: EnhancedProcessor,
    original_text: String,
    mode: Mode,
    main_answer: String,
    follow_ups: Vec<FollowUpQA>,
    debounce: Duration,
}

impl FollowUpSession {
    /// Wraps an answer that was produced elsewhere.
    pub fn new(
        processor: EnhancedProcessor,
        original_text: impl Into<String>,
        mode: Mode,
        main_answer: impl Into<String>,
    ) -> Self {
        Self {
            processor,
            original_text: original_text.into(),
            mode,
            main_answer: main_answer.into(),
            follow_ups: Vec::new(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Processes `text` and opens a session on the answer.
    ///
    /// `on_chunk` sees every coalesced chunk, including the terminal one.
    pub async fn start<F>(
        processor: EnhancedProcessor,
        text: &str,
        mode: Mode,
        debounce: Duration,
        on_chunk: F,
    ) -> Result<Self, LightupError>
    where
        F: FnMut(&AnnotatedChunk),
    {
        let request = ProcessTextRequest::new(text, mode);
        let stream = processor.process_text_enhanced(request).await;
        let answer = drain(coalesce_chunks(stream, debounce), on_chunk).await?;

        let mut session = Self::new(processor, text, mode, answer);
        session.debounce = debounce;
        Ok(session)
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn main_answer(&self) -> &str {
        &self.main_answer
    }

    pub fn follow_ups(&self) -> &[FollowUpQA] {
        &self.follow_ups
    }

    /// Asks `question` about the original text and streams the answer.
    ///
    /// The new entry is visible in [`follow_ups`](Self::follow_ups) while it
    /// streams. A failed question is removed again and its error returned.
    pub async fn ask<F>(
        &mut self,
        question: &str,
        on_chunk: F,
    ) -> Result<&FollowUpQA, LightupError>
    where
        F: FnMut(&AnnotatedChunk),
    {
        let context = FollowUpContext {
            original_text: self.original_text.clone(),
            main_answer: self.main_answer.clone(),
            previous: self
                .follow_ups
                .iter()
                .filter(|qa| qa.is_complete)
                .map(|qa| AnsweredQuestion {
                    question: qa.question.clone(),
                    answer: qa.answer.clone(),
                })
                .collect(),
        };

        let id = chrono::Utc::now().timestamp_millis();
        self.follow_ups.push(FollowUpQA {
            id,
            question: question.to_string(),
            answer: String::new(),
            is_complete: false,
            history_updated: false,
        });
        let index = self.follow_ups.len() - 1;
        debug!(id, previous = context.previous.len(), "asking follow-up");

        let request =
            ProcessTextRequest::follow_up(question, self.mode, context).with_id(id.to_string());
        let stream = coalesce_chunks(
            self.processor.process_text_enhanced(request).await,
            self.debounce,
        );

        let mut on_chunk = on_chunk;
        let entry = &mut self.follow_ups[index];
        let result = drain(stream, |chunk| {
            if let Some(text) = chunk.text() {
                entry.answer.push_str(text);
            }
            on_chunk(chunk);
        })
        .await;

        match result {
            Ok(_) => {
                let request_id = id.to_string();
                entry.is_complete = true;
                entry.history_updated = self
                    .processor
                    .flush_memory()
                    .await
                    .iter()
                    .any(|update| update.recorded && update.id.as_deref() == Some(request_id.as_str()));
                info!(
                    id,
                    chars = entry.answer.chars().count(),
                    history_updated = entry.history_updated,
                    "follow-up answered"
                );
                Ok(&self.follow_ups[index])
            }
            Err(e) => {
                self.follow_ups.remove(index);
                Err(e)
            }
        }
    }

    /// Snapshot of the conversation for export.
    pub fn export(&self) -> ConversationExport {
        ConversationExport {
            original_text: self.original_text.clone(),
            mode: self.mode,
            main_answer: self.main_answer.clone(),
            follow_ups: self.follow_ups.clone(),
        }
    }
}

/// Consumes a stream, returning the concatenated text or the error it ended with.
async fn drain<F>(mut stream: AnnotatedStream, mut on_chunk: F) -> Result<String, LightupError>
where
    F: FnMut(&AnnotatedChunk),
{
    let mut answer = String::new();
    while let Some(chunk) = stream.next().await {
        on_chunk(&chunk);
        match chunk.envelope.chunk {
            StreamChunk::Chunk { content } => answer.push_str(&content),
            StreamChunk::Done => return Ok(answer),
            StreamChunk::Error { error } => return Err(LightupError::provider(error)),
        }
    }
    Ok(answer)
}
