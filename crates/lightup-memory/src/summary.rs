// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summaries of older conversation history.
//!
//! One LLM attempt; any failure degrades to a summary sliced from the last
//! few user messages. Nothing here surfaces an error to the caller.

use std::collections::HashMap;

use lightup_core::{
    LightupError, Message, ProviderAdapter, ProviderMessage, ProviderRequest, Role,
};
use tracing::{debug, warn};

use crate::entities::excerpt;
use crate::types::Summary;

/// System prompt for the summarization call.
const SUMMARY_PROMPT: &str = "You are a conversation summarizer. Summarize the conversation \
below in 2-3 sentences. Keep names, the topics discussed, questions the user asked and any \
preferences they expressed. Leave out greetings and filler.";

/// User messages quoted by the fallback summary.
const FALLBACK_MESSAGES: usize = 3;
/// Characters kept from each quoted message.
const FALLBACK_CHARS: usize = 50;
const MAX_KEY_TOPICS: usize = 5;

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "their", "there", "these", "those", "which", "would", "could",
    "should", "where", "while", "other", "being", "because", "what", "with", "this", "that",
    "from", "have", "your", "into", "they", "them", "then", "than", "when", "will", "just",
    "also", "does", "more", "some", "very",
];

/// Asks `provider` for a summary of `messages`.
pub async fn generate_summary(
    provider: &dyn ProviderAdapter,
    messages: &[Message],
    max_tokens: u32,
) -> Result<String, LightupError> {
    let transcript = messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    let request = ProviderRequest {
        model: None,
        system_prompt: Some(SUMMARY_PROMPT.to_string()),
        messages: vec![ProviderMessage::user(format!(
            "Summarize this conversation:\n\n{transcript}"
        ))],
        max_tokens,
        temperature: 0.3,
    };

    let response = provider.complete(request).await?;
    let content = response.content.trim().to_string();
    if content.is_empty() {
        return Err(LightupError::provider("summary response was empty"));
    }
    debug!(
        model = %response.model,
        messages = messages.len(),
        "conversation summary generated"
    );
    Ok(content)
}

/// Summary built without a model: the last three user messages, clipped.
pub fn fallback_summary(messages: &[Message]) -> String {
    let mut recent: Vec<String> = messages
        .iter()
        .rev()
        .filter(|m| m.role == Role::User)
        .take(FALLBACK_MESSAGES)
        .map(|m| excerpt(&m.content, FALLBACK_CHARS))
        .collect();
    recent.reverse();

    if recent.is_empty() {
        "No user questions in this part of the conversation.".to_string()
    } else {
        format!("Recent discussion: {}", recent.join("; "))
    }
}

/// The most frequent longer words of `messages`.
pub fn extract_key_topics(messages: &[Message]) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let words = messages.iter().flat_map(|m| m.content.split_whitespace());
    for (position, raw) in words.enumerate() {
        let word = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.chars().count() < 4 || STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    // Most frequent first; earlier first seen breaks ties.
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
    ranked
        .into_iter()
        .take(MAX_KEY_TOPICS)
        .map(|(word, _)| word)
        .collect()
}

/// Builds a [`Summary`] of `messages`, via `provider` when one is given.
pub async fn create_conversation_summary(
    provider: Option<&dyn ProviderAdapter>,
    messages: &[Message],
    max_tokens: u32,
) -> Summary {
    let content = match provider {
        Some(provider) => match generate_summary(provider, messages, max_tokens).await {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "summary generation failed, using fallback");
                fallback_summary(messages)
            }
        },
        None => fallback_summary(messages),
    };

    Summary {
        id: uuid::Uuid::new_v4().to_string(),
        content,
        key_topics: extract_key_topics(messages),
        message_count: messages.len(),
        created_at: chrono::Utc::now().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightup_test_utils::{MockProvider, MockReply};

    fn conversation() -> Vec<Message> {
        vec![
            Message::user("first question about tokio runtimes"),
            Message::assistant("answer"),
            Message::user("second question about tokio channels"),
            Message::user("third"),
            Message::user(
                "fourth question that is long enough to be clipped somewhere past fifty chars",
            ),
        ]
    }

    #[test]
    fn fallback_uses_last_three_user_messages() {
        let summary = fallback_summary(&conversation());
        assert_eq!(
            summary,
            "Recent discussion: second question about tokio channels; third; \
             fourth question that is long enough to be clipped..."
        );
    }

    #[test]
    fn fallback_without_user_messages() {
        let summary = fallback_summary(&[Message::assistant("hi")]);
        assert!(summary.starts_with("No user questions"));
    }

    #[test]
    fn key_topics_prefer_frequent_words() {
        let topics = extract_key_topics(&conversation());
        assert_eq!(topics[0], "question");
        assert_eq!(topics[1], "tokio");
        assert!(topics.len() <= MAX_KEY_TOPICS);
    }

    #[tokio::test]
    async fn model_summary_is_used_when_available() {
        let provider = MockProvider::with_responses(vec!["  They discussed tokio.  ".into()]);
        let summary = create_conversation_summary(Some(&provider), &conversation(), 300).await;
        assert_eq!(summary.content, "They discussed tokio.");
        assert_eq!(summary.message_count, 5);

        let requests = provider.requests().await;
        assert_eq!(requests[0].max_tokens, 300);
        assert!(requests[0].messages[0].content.contains("user: third"));
    }

    #[tokio::test]
    async fn provider_failure_falls_back() {
        let provider = MockProvider::new();
        provider.push_reply(MockReply::Fail("network down".into())).await;
        let summary = create_conversation_summary(Some(&provider), &conversation(), 300).await;
        assert!(summary.content.starts_with("Recent discussion:"));
        assert_eq!(provider.call_count().await, 1);
    }

    #[tokio::test]
    async fn empty_model_output_falls_back() {
        let provider = MockProvider::with_responses(vec!["   ".into()]);
        let summary = create_conversation_summary(Some(&provider), &conversation(), 300).await;
        assert!(summary.content.starts_with("Recent discussion:"));
    }
}
