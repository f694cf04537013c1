// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for LightUp.
//!
//! Combines the built-in per-mode templates, the user's custom prompts and
//! response language, and conversation memory into the system and user
//! prompts sent to a provider.

pub mod builder;
pub mod chain_of_thought;
pub mod templates;

pub use builder::{PromptBuilder, QaPair};
pub use chain_of_thought::ChainOfThoughtPrompts;
pub use templates::{TEXT_PLACEHOLDER, fill_template, language_instruction};
