// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly from settings, templates and conversation memory.

use lightup_config::{Settings, TranslationSettings};
use lightup_core::Mode;
use lightup_memory::{ConversationContext, RelevantContext, entity_summary, excerpt};
use tracing::debug;

use crate::chain_of_thought::ChainOfThoughtPrompts;
use crate::templates::{fill_template, language_instruction, system_prompt, user_prompt};

/// Entities listed in the enhanced system prompt.
const PROMPT_ENTITIES: usize = 5;
/// Characters of each retrieved memory quoted in a contextual prompt.
const MEMORY_EXCERPT_CHARS: usize = 200;

/// One answered follow-up, as quoted in the next follow-up prompt.
#[derive(Debug, Clone, Copy)]
pub struct QaPair<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

/// Builds system and user prompts for one request.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    settings: &'a Settings,
    translation: &'a TranslationSettings,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(settings: &'a Settings, translation: &'a TranslationSettings) -> Self {
        Self {
            settings,
            translation,
        }
    }

    /// The custom system prompt for `mode` if set, else the built-in one,
    /// followed by the response-language instruction.
    pub fn system_prompt(&self, mode: Mode) -> String {
        self.with_language(mode, self.base_system_prompt(mode).to_string())
    }

    /// The user prompt for `mode` with `text` substituted.
    pub fn user_prompt(&self, mode: Mode, text: &str) -> String {
        match self
            .settings
            .custom_prompts
            .user_prompts
            .get(&mode)
            .filter(|p| !p.trim().is_empty())
        {
            Some(template) => fill_template(template, text),
            None => user_prompt(mode, text, self.translation),
        }
    }

    /// The user prompt preceded by retrieved memories, when there are any.
    pub fn build_contextual_prompt(
        &self,
        text: &str,
        mode: Mode,
        memories: &[RelevantContext],
    ) -> String {
        let prompt = self.user_prompt(mode, text);
        if memories.is_empty() {
            return prompt;
        }

        let mut out = String::from("Relevant context from our earlier conversation:\n");
        for memory in memories {
            out.push_str(&format!(
                "- [{}] {}\n",
                memory.source,
                excerpt(&memory.content, MEMORY_EXCERPT_CHARS)
            ));
        }
        out.push('\n');
        out.push_str(&prompt);
        debug!(%mode, memories = memories.len(), "contextual prompt built");
        out
    }

    /// Persona plus summary, entities, preferences and reasoning steps.
    pub fn build_enhanced_system_prompt(&self, mode: Mode, context: &ConversationContext) -> String {
        let mut sections = vec![self.base_system_prompt(mode).to_string()];

        if let Some(latest) = context.long_term_memory.last() {
            sections.push(format!("Conversation so far (summary):\n{}", latest.content));
        }

        let entities = entity_summary(context, PROMPT_ENTITIES);
        if !entities.is_empty() {
            sections.push(format!("People, places and organizations mentioned: {entities}"));
        }

        let prefs = &context.user_preferences;
        let mut preference_lines = vec![
            format!("- Preferred response style: {}", prefs.response_style),
            format!("- Expertise level: {}", prefs.expertise_level),
        ];
        if !prefs.interests.is_empty() {
            preference_lines.push(format!("- Interests: {}", prefs.interests.join(", ")));
        }
        sections.push(format!("About the user:\n{}", preference_lines.join("\n")));

        sections.push(ChainOfThoughtPrompts::reasoning_block(mode));
        self.with_language(mode, sections.join("\n\n"))
    }

    /// System prompt for a follow-up question about an earlier answer.
    pub fn follow_up_system_prompt(&self, mode: Mode) -> String {
        format!(
            "{}\n\nYou are continuing a conversation about a piece of text. Answer the \
             follow-up question directly and stay consistent with your earlier answers.",
            self.system_prompt(mode)
        )
    }

    /// Quotes the original text, the first answer and earlier Q&A before the new question.
    pub fn follow_up_prompt(
        &self,
        original_text: &str,
        main_answer: &str,
        previous: &[QaPair<'_>],
        question: &str,
    ) -> String {
        let mut prompt = format!("Original text:\n\"\"\"\n{original_text}\n\"\"\"\n\n");
        if !main_answer.trim().is_empty() {
            prompt.push_str(&format!("Your earlier answer:\n{}\n\n", main_answer.trim()));
        }
        if !previous.is_empty() {
            prompt.push_str("Previous questions and answers:\n");
            for pair in previous {
                prompt.push_str(&format!("Q: {}\nA: {}\n\n", pair.question, pair.answer));
            }
        }
        prompt.push_str(&format!("Follow-up question: {question}"));
        prompt
    }

    fn base_system_prompt(&self, mode: Mode) -> &'a str {
        self.settings
            .custom_prompts
            .system_prompts
            .get(&mode)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| system_prompt(mode))
    }

    fn with_language(&self, mode: Mode, prompt: String) -> String {
        // Translate mode already names its target language.
        if mode == Mode::Translate {
            return prompt;
        }
        match language_instruction(&self.settings.customization.ai_response_language) {
            Some(instruction) => format!("{prompt}\n\n{instruction}"),
            None => prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightup_memory::{ContextSource, Entity, EntityType, Summary};

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn custom_prompts_override_builtins() {
        let mut settings = settings();
        settings
            .custom_prompts
            .system_prompts
            .insert(Mode::Explain, "You are a pirate.".into());
        settings
            .custom_prompts
            .user_prompts
            .insert(Mode::Explain, "Explain like a pirate: ${text}".into());
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);

        assert_eq!(builder.system_prompt(Mode::Explain), "You are a pirate.");
        assert_eq!(
            builder.user_prompt(Mode::Explain, "tides"),
            "Explain like a pirate: tides"
        );
        assert_eq!(builder.system_prompt(Mode::Analyze), system_prompt(Mode::Analyze));
    }

    #[test]
    fn blank_custom_prompt_is_ignored() {
        let mut settings = settings();
        settings
            .custom_prompts
            .user_prompts
            .insert(Mode::Summarize, "   ".into());
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);
        assert!(builder.user_prompt(Mode::Summarize, "x").starts_with("Please summarize"));
    }

    #[test]
    fn language_instruction_skips_translate() {
        let mut settings = settings();
        settings.customization.ai_response_language = "es".into();
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);

        assert!(builder.system_prompt(Mode::Explain).ends_with("respond in Spanish, regardless of the language of the input."));
        assert!(!builder.system_prompt(Mode::Translate).contains("Spanish"));
    }

    #[test]
    fn contextual_prompt_lists_memories_first() {
        let settings = settings();
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);
        let memories = vec![RelevantContext {
            source: ContextSource::History,
            content: "We talked about borrow checking".into(),
            relevance: 1.0,
        }];

        let prompt = builder.build_contextual_prompt("lifetimes", Mode::Explain, &memories);
        assert!(prompt.starts_with("Relevant context from our earlier conversation:\n- [history] We talked about borrow checking\n"));
        assert!(prompt.ends_with("Please explain the following text:\n\nlifetimes"));

        assert_eq!(
            builder.build_contextual_prompt("lifetimes", Mode::Explain, &[]),
            builder.user_prompt(Mode::Explain, "lifetimes")
        );
    }

    #[test]
    fn long_memories_are_shortened() {
        let settings = settings();
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);
        let memories = vec![RelevantContext {
            source: ContextSource::LongTermMemory,
            content: "ö".repeat(MEMORY_EXCERPT_CHARS + 50),
            relevance: 0.5,
        }];

        let prompt = builder.build_contextual_prompt("x", Mode::Free, &memories);
        let line = prompt.lines().nth(1).unwrap();
        let expected = format!("- [longTermMemory] {}...", "ö".repeat(MEMORY_EXCERPT_CHARS));
        assert_eq!(line, expected);
    }

    #[test]
    fn enhanced_system_prompt_has_every_section() {
        let settings = settings();
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);
        let context = ConversationContext {
            long_term_memory: vec![Summary {
                id: "1".into(),
                content: "User is learning Rust.".into(),
                key_topics: vec![],
                message_count: 15,
                created_at: 0,
            }],
            entities: vec![Entity {
                name: "Mozilla".into(),
                entity_type: EntityType::Organization,
                mentions: 2,
                last_mentioned_index: 3,
                description: String::new(),
            }],
            ..Default::default()
        };

        let prompt = builder.build_enhanced_system_prompt(Mode::Analyze, &context);
        assert!(prompt.starts_with(system_prompt(Mode::Analyze)));
        assert!(prompt.contains("Conversation so far (summary):\nUser is learning Rust."));
        assert!(prompt.contains("Mozilla (organization, 2 mentions)"));
        assert!(prompt.contains("- Expertise level: intermediate"));
        assert!(prompt.ends_with("5. Conclude with an overall assessment."));
    }

    #[test]
    fn follow_up_prompt_quotes_history() {
        let settings = settings();
        let translation = TranslationSettings::default();
        let builder = PromptBuilder::new(&settings, &translation);
        let prompt = builder.follow_up_prompt(
            "E = mc^2",
            "Mass-energy equivalence.",
            &[QaPair {
                question: "What is c?",
                answer: "The speed of light.",
            }],
            "Why squared?",
        );
        assert!(prompt.starts_with("Original text:\n\"\"\"\nE = mc^2\n\"\"\""));
        assert!(prompt.contains("Your earlier answer:\nMass-energy equivalence.\n\n"));
        assert!(prompt.contains("Q: What is c?\nA: The speed of light."));
        assert!(prompt.ends_with("Follow-up question: Why squared?"));
    }
}
