// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lightup context` command implementation.

use std::fmt::Write as _;

use colored::Colorize;
use lightup_core::LightupError;
use lightup_memory::{ConversationContext, clear_context, conversation_stats, entity_summary, load_context};
use serde_json::json;

use crate::runtime::Runtime;

const SHOWN_ENTITIES: usize = 10;
const SHOWN_MESSAGES: usize = 6;
const PREVIEW_CHARS: usize = 100;

pub async fn run_show(runtime: &Runtime, json: bool) -> Result<(), LightupError> {
    let context = load_context(runtime.storage()).await?;
    if json {
        let overview = json!({
            "stats": conversation_stats(&context),
            "entities": context.entities,
            "summaries": context.long_term_memory,
            "userPreferences": context.user_preferences,
        });
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print!("{}", render_overview(&context));
    }
    Ok(())
}

pub async fn run_clear(runtime: &Runtime) -> Result<(), LightupError> {
    clear_context(runtime.storage()).await?;
    println!("conversation memory cleared");
    Ok(())
}

fn render_overview(context: &ConversationContext) -> String {
    let stats = conversation_stats(context);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} messages ({} user, {} assistant), {} in window, {} summaries, {} entities",
        "memory:".bold(),
        stats.total_messages,
        stats.user_messages,
        stats.assistant_messages,
        stats.window_messages,
        stats.summaries,
        stats.entities
    );

    let entities = entity_summary(context, SHOWN_ENTITIES);
    if !entities.is_empty() {
        let _ = writeln!(out, "{} {entities}", "entities:".bold());
    }

    let prefs = &context.user_preferences;
    let _ = writeln!(
        out,
        "{} {} answers, {} level",
        "style:".bold(),
        prefs.response_style,
        prefs.expertise_level
    );

    if let Some(summary) = context.long_term_memory.last() {
        let _ = writeln!(out, "{} {}", "latest summary:".bold(), preview(&summary.content));
    }

    let start = context.context_window.len().saturating_sub(SHOWN_MESSAGES);
    for message in &context.context_window[start..] {
        let _ = writeln!(
            out,
            "  {} {}",
            format!("{}:", message.role).dimmed(),
            preview(&message.content)
        );
    }
    out
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_support::runtime_with;
    use lightup_core::Message;
    use lightup_memory::save_context;
    use lightup_test_utils::MockProvider;

    #[test]
    fn overview_lists_counts_and_recent_turns() {
        let context = ConversationContext {
            history: vec![Message::user("Where is Paris?"), Message::assistant("In France.")],
            context_window: vec![Message::user("Where is Paris?"), Message::assistant("In France.")],
            ..ConversationContext::default()
        };

        let text = render_overview(&context);
        assert!(text.contains("2 messages (1 user, 1 assistant)"));
        assert!(text.contains("In France."));
    }

    #[test]
    fn long_text_is_shortened() {
        let long = "word ".repeat(50);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }

    #[tokio::test]
    async fn clear_forgets_the_conversation() {
        let (_dir, runtime) = runtime_with(MockProvider::new()).await;
        let mut context = ConversationContext::default();
        context.history.push(Message::user("hello"));
        save_context(runtime.storage(), &context).await.unwrap();

        run_clear(&runtime).await.unwrap();
        assert!(load_context(runtime.storage()).await.unwrap().history.is_empty());
    }
}
