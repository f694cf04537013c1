// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation memory manager.

use std::sync::Arc;

use lightup_config::{Customization, MemoryConfig};
use lightup_core::{Message, ProviderAdapter, Role};
use tracing::{debug, info};

use crate::buffer::{calculate_importance, intelligent_trim};
use crate::entities::{extract_entities, merge_entities};
use crate::preferences::update_user_preferences;
use crate::retrieval::retrieve_relevant_context;
use crate::summary::create_conversation_summary;
use crate::types::{ConversationContext, ConversationStats, RelevantContext, Summary};

/// Mutates a [`ConversationContext`] as turns arrive.
///
/// Holds no conversation state itself; the same manager can serve any
/// number of contexts.
#[derive(Clone)]
pub struct ConversationMemoryManager {
    config: MemoryConfig,
    summarizer: Option<Arc<dyn ProviderAdapter>>,
    enable_summaries: bool,
    enable_entity_tracking: bool,
}

impl ConversationMemoryManager {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            config,
            summarizer: None,
            enable_summaries: true,
            enable_entity_tracking: true,
        }
    }

    /// Provider used for summaries; without one the fallback summary is used.
    pub fn with_summarizer(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.summarizer = Some(provider);
        self
    }

    /// Applies the user's summary and entity-tracking toggles.
    pub fn with_customization(mut self, customization: &Customization) -> Self {
        self.enable_summaries = customization.enable_summaries;
        self.enable_entity_tracking = customization.enable_entity_tracking;
        self
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Adds `message` to the context.
    ///
    /// Scores and stamps the message, records it in history and the window,
    /// tracks its entities and preferences, trims an overflowing window and
    /// folds a summary into long-term memory when enough new turns arrived.
    pub async fn manage_conversation_buffer(
        &self,
        context: &mut ConversationContext,
        mut message: Message,
    ) {
        let extracted = extract_entities(&message.content);
        message.importance = calculate_importance(&message.content, extracted.len());
        message.timestamp = chrono::Utc::now().timestamp_millis();

        context.history.push(message.clone());
        let index = context.history.len() - 1;

        if self.enable_entity_tracking {
            merge_entities(&mut context.entities, &extracted, index, &message.content);
        }
        if message.role == Role::User
            && update_user_preferences(&mut context.user_preferences, &message.content, &extracted)
        {
            debug!(preferences = ?context.user_preferences, "user preferences updated");
        }

        context.context_window.push(message);
        if context.context_window.len() > self.config.max_buffer_size {
            let before = context.context_window.len();
            context.context_window =
                intelligent_trim(&context.context_window, self.config.context_window_size);
            debug!(
                before,
                after = context.context_window.len(),
                "context window trimmed"
            );
        }

        if self.should_summarize(context) {
            let pending = context.history[context.summarized_through..].to_vec();
            let summary = self.create_conversation_summary(&pending).await;
            self.fold_summary(context, summary);
        }
    }

    fn should_summarize(&self, context: &ConversationContext) -> bool {
        let unsummarized = context
            .history
            .len()
            .saturating_sub(context.summarized_through);
        self.enable_summaries
            && context.context_window.len() >= self.config.summary_trigger_size
            && unsummarized >= self.config.summary_trigger_size
    }

    fn fold_summary(&self, context: &mut ConversationContext, summary: Summary) {
        info!(
            messages = summary.message_count,
            topics = ?summary.key_topics,
            "conversation summarized"
        );
        context.long_term_memory.push(summary);
        context.summarized_through = context.history.len();

        let limit = self.config.long_term_limit;
        let excess = context.long_term_memory.len().saturating_sub(limit);
        if excess > 0 {
            context.long_term_memory.drain(..excess);
        }
    }

    /// Summarizes `messages` with the configured summarizer or the fallback.
    pub async fn create_conversation_summary(&self, messages: &[Message]) -> Summary {
        create_conversation_summary(
            self.summarizer.as_deref(),
            messages,
            self.config.summary_max_tokens,
        )
        .await
    }

    /// The most relevant history, summaries and entities for `query`.
    pub fn retrieve_relevant_context(
        &self,
        query: &str,
        context: &ConversationContext,
    ) -> Vec<RelevantContext> {
        retrieve_relevant_context(query, context, self.config.max_relevant_results)
    }
}

/// The `limit` most mentioned entities as `Name (type, N mentions)`, comma separated.
pub fn entity_summary(context: &ConversationContext, limit: usize) -> String {
    let mut entities: Vec<_> = context.entities.iter().collect();
    entities.sort_by(|a, b| {
        b.mentions
            .cmp(&a.mentions)
            .then(b.last_mentioned_index.cmp(&a.last_mentioned_index))
    });
    entities
        .into_iter()
        .take(limit)
        .map(|e| {
            let noun = if e.mentions == 1 { "mention" } else { "mentions" };
            format!("{} ({}, {} {noun})", e.name, e.entity_type, e.mentions)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn conversation_stats(context: &ConversationContext) -> ConversationStats {
    let count = |role: Role| context.history.iter().filter(|m| m.role == role).count();
    ConversationStats {
        total_messages: context.history.len(),
        user_messages: count(Role::User),
        assistant_messages: count(Role::Assistant),
        window_messages: context.context_window.len(),
        summaries: context.long_term_memory.len(),
        entities: context.entities.len(),
    }
}
