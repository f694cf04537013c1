// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lightup process` command implementation.
//!
//! Streams one answer to stdout as it arrives. With `--json` every chunk is
//! printed as one JSON line in the message shape UIs consume.

use std::io::Write;

use futures::StreamExt;
use lightup_agent::{AnnotatedStream, ProcessTextRequest};
use lightup_core::{LightupError, Mode, StreamChunk};
use tracing::debug;

use crate::runtime::Runtime;

pub async fn run_process(
    runtime: &Runtime,
    mode: Mode,
    text: &str,
    json: bool,
) -> Result<(), LightupError> {
    runtime.ensure_enabled().await?;

    let request = ProcessTextRequest::new(text, mode);
    let stream = runtime.processor.process_text_enhanced(request).await;
    let mut stdout = std::io::stdout().lock();
    let answer = write_stream(stream, json, &mut stdout).await?;
    if !json && !answer.ends_with('\n') {
        writeln!(stdout).map_err(io_err)?;
    }
    Ok(())
}

/// Writes `stream` to `out` and returns the answer text.
///
/// An `Error` chunk ends the stream and becomes the returned error; in JSON
/// mode it is printed first.
pub async fn write_stream<W: Write>(
    mut stream: AnnotatedStream,
    json: bool,
    out: &mut W,
) -> Result<String, LightupError> {
    let mut answer = String::new();
    while let Some(chunk) = stream.next().await {
        if json {
            serde_json::to_writer(&mut *out, &chunk)?;
            writeln!(out).map_err(io_err)?;
        }
        match chunk.envelope.chunk {
            StreamChunk::Chunk { content } => {
                if !json {
                    out.write_all(content.as_bytes()).map_err(io_err)?;
                }
                out.flush().map_err(io_err)?;
                answer.push_str(&content);
            }
            StreamChunk::Done => {
                debug!(
                    chars = answer.chars().count(),
                    confidence = ?chunk.confidence_score,
                    relevance = ?chunk.relevance_score,
                    "answer complete"
                );
                break;
            }
            StreamChunk::Error { error } => return Err(LightupError::provider(error)),
        }
    }
    Ok(answer)
}

pub fn io_err(e: std::io::Error) -> LightupError {
    LightupError::Internal(format!("failed to write output: {e}"))
}
