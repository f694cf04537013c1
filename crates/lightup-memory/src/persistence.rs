// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading and saving the conversation context through a storage adapter.

use lightup_config::CONVERSATION_CONTEXT_KEY;
use lightup_core::{LightupError, StorageAdapter, read_json, write_json};
use tracing::debug;

use crate::types::ConversationContext;

/// Reads the stored context, or an empty one when nothing is stored.
pub async fn load_context(
    storage: &dyn StorageAdapter,
) -> Result<ConversationContext, LightupError> {
    let context: ConversationContext = read_json(storage, CONVERSATION_CONTEXT_KEY)
        .await?
        .unwrap_or_default();
    debug!(
        history = context.history.len(),
        summaries = context.long_term_memory.len(),
        "conversation context loaded"
    );
    Ok(context)
}

pub async fn save_context(
    storage: &dyn StorageAdapter,
    context: &ConversationContext,
) -> Result<(), LightupError> {
    write_json(storage, CONVERSATION_CONTEXT_KEY, context).await
}

/// Forgets the whole conversation.
pub async fn clear_context(storage: &dyn StorageAdapter) -> Result<(), LightupError> {
    storage.remove(CONVERSATION_CONTEXT_KEY).await
}
