// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lightup export` command implementation.

use std::path::{Path, PathBuf};

use lightup_agent::{ConversationExport, ExportFormat, FollowUpSession, export_conversation};
use lightup_core::{LightupError, Mode};
use lightup_storage::accessors::load_settings;
use tracing::info;

use crate::runtime::Runtime;

/// Answers `text`, asks each of `questions` in turn and saves the result.
pub async fn run_export(
    runtime: &Runtime,
    mode: Mode,
    text: &str,
    questions: &[String],
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<(), LightupError> {
    runtime.ensure_enabled().await?;

    let conversation = build_conversation(runtime, mode, text, questions).await?;
    if let Some(path) = save_export(runtime, &conversation, format, output).await? {
        eprintln!("saved {}", path.display());
    }
    Ok(())
}

async fn build_conversation(
    runtime: &Runtime,
    mode: Mode,
    text: &str,
    questions: &[String],
) -> Result<ConversationExport, LightupError> {
    let mut session = FollowUpSession::start(
        runtime.processor.clone(),
        text,
        mode,
        runtime.debounce(),
        |_| {},
    )
    .await?;
    for question in questions {
        session.ask(question, |_| {}).await?;
    }
    Ok(session.export())
}

/// Renders `conversation` and writes it to `path`, or to stdout without one.
///
/// Returns the path written. HTML is sized from the user's font size setting.
pub async fn save_export(
    runtime: &Runtime,
    conversation: &ConversationExport,
    format: ExportFormat,
    path: Option<&Path>,
) -> Result<Option<PathBuf>, LightupError> {
    let settings = load_settings(runtime.storage()).await?;
    let rendered = export_conversation(conversation, format, &settings.customization.font_size)?;

    let Some(path) = path else {
        println!("{rendered}");
        return Ok(None);
    };

    let path = if path.extension().is_none() {
        path.with_extension(format.extension())
    } else {
        path.to_path_buf()
    };
    tokio::fs::write(&path, rendered)
        .await
        .map_err(|e| LightupError::Internal(format!("failed to write {}: {e}", path.display())))?;
    info!(path = %path.display(), %format, follow_ups = conversation.follow_ups.len(), "conversation exported");
    Ok(Some(path))
}
