// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in system prompts and user prompt templates, one per mode.

use lightup_config::{TranslationSettings, language_name};
use lightup_core::Mode;

/// Placeholder replaced by the selected text in custom user prompts.
pub const TEXT_PLACEHOLDER: &str = "${text}";

const EXPLAIN_SYSTEM: &str = "You are a patient teacher who explains text clearly. \
Break down difficult ideas, define jargon the first time it appears and use a short \
example when it helps. Use Markdown for structure but keep the answer focused.";

const SUMMARIZE_SYSTEM: &str = "You are an expert at distilling text. Capture the main \
points and key details in a short summary. Do not add opinions or information that is \
not in the text.";

const ANALYZE_SYSTEM: &str = "You are a careful analyst. Examine the text for its main \
claims, underlying assumptions, tone and intended audience. Point out strengths, \
weaknesses and anything that is missing or misleading.";

const TRANSLATE_SYSTEM: &str = "You are a professional translator. Translate faithfully, \
preserving meaning, tone and formatting. Return only the translation, without notes \
or explanations.";

const FREE_SYSTEM: &str = "You are a friendly and knowledgeable assistant. Answer the \
user's questions about the text they selected or anything else they ask, accurately \
and in a conversational tone.";

/// The built-in system prompt for `mode`.
pub fn system_prompt(mode: Mode) -> &'static str {
    match mode {
        Mode::Explain => EXPLAIN_SYSTEM,
        Mode::Summarize => SUMMARIZE_SYSTEM,
        Mode::Analyze => ANALYZE_SYSTEM,
        Mode::Translate => TRANSLATE_SYSTEM,
        Mode::Free => FREE_SYSTEM,
    }
}

/// The built-in user prompt for `mode` with `text` filled in.
pub fn user_prompt(mode: Mode, text: &str, translation: &TranslationSettings) -> String {
    match mode {
        Mode::Explain => format!("Please explain the following text:\n\n{text}"),
        Mode::Summarize => format!("Please summarize the following text:\n\n{text}"),
        Mode::Analyze => format!("Please analyze the following text:\n\n{text}"),
        Mode::Translate => {
            let to = language_name(&translation.to_language);
            if translation.from_language == "auto" {
                format!("Detect the language of the following text and translate it to {to}:\n\n{text}")
            } else {
                let from = language_name(&translation.from_language);
                format!("Translate the following text from {from} to {to}:\n\n{text}")
            }
        }
        Mode::Free => text.to_string(),
    }
}

/// Substitutes every `${text}` in a custom template; templates without the
/// placeholder get the text appended.
pub fn fill_template(template: &str, text: &str) -> String {
    if template.contains(TEXT_PLACEHOLDER) {
        template.replace(TEXT_PLACEHOLDER, text)
    } else {
        format!("{template}\n\n{text}")
    }
}

/// Instruction appended to system prompts so the model answers in `code`.
///
/// English needs none.
pub fn language_instruction(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() || code.eq_ignore_ascii_case("en") {
        return None;
    }
    Some(format!(
        "Always respond in {}, regardless of the language of the input.",
        language_name(code)
    ))
}
