// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed per-mode reasoning steps appended to enhanced system prompts.

use lightup_core::Mode;

/// Reasoning instructions for each mode.
pub struct ChainOfThoughtPrompts;

impl ChainOfThoughtPrompts {
    /// The ordered steps the model is asked to work through for `mode`.
    pub fn steps(mode: Mode) -> &'static [&'static str] {
        match mode {
            Mode::Explain => &[
                "Identify the core concept the text is about.",
                "Work out which background knowledge the reader needs.",
                "Explain the concept from the simplest idea upward.",
                "Add an example or analogy where it makes the idea concrete.",
                "Check the explanation against the original text for accuracy.",
            ],
            Mode::Summarize => &[
                "Find the main argument or purpose of the text.",
                "List the supporting points in order of importance.",
                "Drop repetition, examples and asides.",
                "Write the summary in your own words without adding claims.",
            ],
            Mode::Analyze => &[
                "State the main claims the text makes.",
                "Identify the evidence offered for each claim.",
                "Surface unstated assumptions and possible biases.",
                "Weigh strengths against weaknesses.",
                "Conclude with an overall assessment.",
            ],
            Mode::Translate => &[
                "Determine the source language and register.",
                "Translate meaning first, then refine wording for natural phrasing.",
                "Keep names, numbers and formatting intact.",
            ],
            Mode::Free => &[
                "Understand what the user is actually asking.",
                "Use earlier conversation context when it is relevant.",
                "Answer directly, then add detail only where it helps.",
            ],
        }
    }

    /// The steps rendered as a numbered instruction block.
    pub fn reasoning_block(mode: Mode) -> String {
        let mut block = String::from(
            "Before answering, reason through these steps internally and present only the final answer:\n",
        );
        for (i, step) in Self::steps(mode).iter().enumerate() {
            block.push_str(&format!("{}. {step}\n", i + 1));
        }
        block.truncate(block.trim_end().len());
        block
    }
}
