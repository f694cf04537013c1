// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-overlap retrieval over history, summaries and entities.

use crate::types::{ContextSource, ConversationContext, RelevantContext};

/// Lowercased query words longer than two characters.
pub fn query_words(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Fraction of `words` that occur in `text` as literal substrings.
pub fn keyword_relevance(words: &[String], text: &str) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let hits = words.iter().filter(|w| haystack.contains(w.as_str())).count();
    hits as f64 / words.len() as f64
}

/// Searches history, long-term memory and entities for `query`.
///
/// Hits with zero relevance are dropped; the rest are sorted by
/// non-increasing relevance (ties keep search order) and cut to `limit`.
pub fn retrieve_relevant_context(
    query: &str,
    context: &ConversationContext,
    limit: usize,
) -> Vec<RelevantContext> {
    let words = query_words(query);
    if words.is_empty() {
        return Vec::new();
    }

    let history = context
        .history
        .iter()
        .map(|m| (ContextSource::History, m.content.clone()));
    let summaries = context.long_term_memory.iter().map(|s| {
        let text = if s.key_topics.is_empty() {
            s.content.clone()
        } else {
            format!("{} (topics: {})", s.content, s.key_topics.join(", "))
        };
        (ContextSource::LongTermMemory, text)
    });
    let entities = context.entities.iter().map(|e| {
        (
            ContextSource::Entity,
            format!("{} ({}): {}", e.name, e.entity_type, e.description),
        )
    });

    let mut hits: Vec<RelevantContext> = history
        .chain(summaries)
        .chain(entities)
        .filter_map(|(source, content)| {
            let relevance = keyword_relevance(&words, &content);
            (relevance > 0.0).then_some(RelevantContext {
                source,
                content,
                relevance,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    hits.truncate(limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entity, EntityType, Summary};
    use lightup_core::Message;

    fn context() -> ConversationContext {
        ConversationContext {
            history: vec![
                Message::user("Tell me about rust ownership"),
                Message::assistant("Ownership moves values between bindings"),
                Message::user("and the borrow checker?"),
            ],
            long_term_memory: vec![Summary {
                id: "s1".into(),
                content: "Discussed rust lifetimes".into(),
                key_topics: vec!["lifetimes".into()],
                message_count: 4,
                created_at: 0,
            }],
            entities: vec![Entity {
                name: "Rust Foundation".into(),
                entity_type: EntityType::Organization,
                mentions: 1,
                last_mentioned_index: 0,
                description: "stewards the language".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn short_words_are_ignored() {
        assert_eq!(query_words("Is it OK? Rust!"), vec!["rust"]);
    }

    #[test]
    fn relevance_is_fraction_of_words() {
        let words = query_words("rust ownership borrow");
        assert!((keyword_relevance(&words, "Rust ownership") - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn results_are_sorted_and_nonzero() {
        let hits = retrieve_relevant_context("rust ownership", &context(), 5);
        assert_eq!(hits[0].content, "Tell me about rust ownership");
        assert_eq!(hits[0].relevance, 1.0);
        assert!(hits.windows(2).all(|w| w[0].relevance >= w[1].relevance));
        assert!(hits.iter().all(|h| h.relevance > 0.0));
        assert!(hits.iter().any(|h| h.source == ContextSource::Entity));
        assert!(hits.iter().any(|h| h.source == ContextSource::LongTermMemory));
    }

    #[test]
    fn empty_query_finds_nothing() {
        assert!(retrieve_relevant_context("a b", &context(), 5).is_empty());
    }

    #[test]
    fn limit_is_respected() {
        assert_eq!(retrieve_relevant_context("rust", &context(), 2).len(), 2);
    }
}
