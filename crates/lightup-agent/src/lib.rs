// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request processing for LightUp.
//!
//! The [`EnhancedProcessor`] is the central coordinator that:
//! - loads settings and the stored conversation context
//! - picks the provider for `settings.modelType`
//! - augments prompts with memories according to the quality level
//! - streams scored chunks back and records the exchange in memory
//!
//! [`FollowUpSession`] builds question-and-answer threads on top of it,
//! and [`export_conversation`] renders a thread for saving.

pub mod coalesce;
pub mod dispatch;
pub mod errors;
pub mod export;
pub mod follow_up;
pub mod processor;
pub mod request;
pub mod scoring;

pub use coalesce::coalesce_chunks;
pub use dispatch::{DefaultProviderFactory, ProviderFactory};
pub use errors::friendly_error;
pub use export::{ConversationExport, ExportFormat, export_conversation};
pub use follow_up::{DEFAULT_DEBOUNCE, FollowUpQA, FollowUpSession};
pub use processor::{EnhancedProcessor, MemoryUpdate};
pub use request::{
    AnnotatedChunk, AnnotatedStream, AnsweredQuestion, FollowUpContext, ProcessTextRequest,
};
