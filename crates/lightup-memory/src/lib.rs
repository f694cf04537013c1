// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory for LightUp.
//!
//! Buffers dialogue turns with heuristic importance, trims the recent
//! window when it overflows, folds older history into summaries, tracks
//! regex-extracted entities and retrieves context by keyword overlap.
//!
//! ## Layout
//!
//! - **ConversationMemoryManager**: applies one turn to a [`ConversationContext`]
//! - **buffer**: importance scoring and `intelligent_trim`
//! - **entities**: person/location/organization extraction
//! - **retrieval**: keyword relevance search
//! - **summary**: LLM summaries with a sliced fallback
//! - **persistence**: load/save through a `StorageAdapter`

pub mod buffer;
pub mod entities;
pub mod manager;
pub mod persistence;
pub mod preferences;
pub mod retrieval;
pub mod summary;
pub mod types;

pub use buffer::{calculate_importance, intelligent_trim};
pub use entities::{ExtractedEntity, excerpt, extract_entities};
pub use manager::{ConversationMemoryManager, conversation_stats, entity_summary};
pub use persistence::{clear_context, load_context, save_context};
pub use preferences::update_user_preferences;
pub use retrieval::retrieve_relevant_context;
pub use summary::{fallback_summary, generate_summary};
pub use types::*;
