// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory domain types.
//!
//! These are persisted as one JSON document, so every struct tolerates
//! missing fields.

use lightup_core::Message;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The whole memory state of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationContext {
    /// Every message ever added, oldest first.
    pub history: Vec<Message>,
    pub entities: Vec<Entity>,
    /// The recent messages used for prompts; trimmed when it overflows.
    pub context_window: Vec<Message>,
    /// Summaries of older history, oldest first.
    pub long_term_memory: Vec<Summary>,
    pub user_preferences: UserPreferences,
    /// Number of history messages already covered by a summary.
    pub summarized_through: usize,
}

/// Kind of a heuristically extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityType {
    Person,
    Location,
    Organization,
}

/// A named phrase tracked across turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub mentions: u32,
    /// Index into `history` of the latest message mentioning it.
    pub last_mentioned_index: usize,
    /// Excerpt of the message the entity was first seen in.
    #[serde(default)]
    pub description: String,
}

/// A condensed stretch of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    pub message_count: usize,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseStyle {
    Concise,
    #[default]
    Balanced,
    Detailed,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpertiseLevel {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

/// Preferences inferred from what the user writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub response_style: ResponseStyle,
    pub expertise_level: ExpertiseLevel,
    pub language: String,
    /// Most recent first.
    pub interests: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            response_style: ResponseStyle::Balanced,
            expertise_level: ExpertiseLevel::Intermediate,
            language: "en".to_string(),
            interests: Vec::new(),
        }
    }
}

/// Where a retrieved memory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ContextSource {
    History,
    LongTermMemory,
    Entity,
}

/// One hit of [`retrieve_relevant_context`](crate::retrieve_relevant_context).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantContext {
    pub source: ContextSource,
    pub content: String,
    /// Fraction of query words found in `content`, in `(0.0, 1.0]`.
    pub relevance: f64,
}

/// Counters shown by `lightup context show`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub window_messages: usize,
    pub summaries: usize,
    pub entities: usize,
}
