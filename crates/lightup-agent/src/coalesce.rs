// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Debounced batching of streamed text.

use std::collections::VecDeque;
use std::time::Duration;

use futures::StreamExt;
use futures::stream;
use lightup_core::StreamChunk;
use tokio::time::Instant;

use crate::request::{AnnotatedChunk, AnnotatedStream};

/// Merges text chunks that arrive within `window` of the first pending one.
///
/// A batch is flushed when the window closes; `Done` and `Error` flush the
/// pending batch immediately and are passed through after it. Scores of a
/// merged chunk are those of its last piece. Nothing is read after a
/// terminal chunk.
pub fn coalesce_chunks(inner: AnnotatedStream, window: Duration) -> AnnotatedStream {
    let state = Coalescer {
        inner,
        window,
        pending: None,
        deadline: None,
        ready: VecDeque::new(),
        finished: false,
    };
    Box::pin(stream::unfold(state, Coalescer::next))
}

struct Coalescer {
    inner: AnnotatedStream,
    window: Duration,
    pending: Option<AnnotatedChunk>,
    deadline: Option<Instant>,
    ready: VecDeque<AnnotatedChunk>,
    finished: bool,
}

impl Coalescer {
    async fn next(mut self) -> Option<(AnnotatedChunk, Self)> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some((chunk, self));
            }
            if self.finished {
                return None;
            }

            let item = match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, self.inner.next()).await
                {
                    Ok(item) => item,
                    Err(_) => {
                        self.flush();
                        continue;
                    }
                },
                None => self.inner.next().await,
            };

            match item {
                Some(chunk) if chunk.is_terminal() => {
                    self.flush();
                    self.ready.push_back(chunk);
                    self.finished = true;
                }
                Some(chunk) => self.absorb(chunk),
                None => {
                    self.flush();
                    self.finished = true;
                }
            }
        }
    }

    fn absorb(&mut self, chunk: AnnotatedChunk) {
        match &mut self.pending {
            Some(pending) => {
                if let (StreamChunk::Chunk { content }, Some(piece)) =
                    (&mut pending.envelope.chunk, chunk.text())
                {
                    content.push_str(piece);
                }
                pending.confidence_score = chunk.confidence_score;
                pending.relevance_score = chunk.relevance_score;
            }
            None => {
                self.deadline = Some(Instant::now() + self.window);
                self.pending = Some(chunk);
            }
        }
    }

    fn flush(&mut self) {
        self.deadline = None;
        if let Some(pending) = self.pending.take() {
            self.ready.push_back(pending);
        }
    }
}
