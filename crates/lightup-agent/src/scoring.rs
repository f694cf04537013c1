// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic quality scores attached to streamed chunks.
//!
//! Both scores are computed over the answer accumulated so far and are
//! rounded to two decimals. They are hints for a UI, not measurements.

use lightup_memory::retrieval::keyword_relevance;

/// Phrases that signal an unsure answer.
const HEDGES: &[&str] = &[
    "i think",
    "i'm not sure",
    "not sure",
    "might",
    "maybe",
    "possibly",
    "perhaps",
    "it seems",
    "unclear",
];

const BASE_CONFIDENCE: f64 = 0.6;
const HEDGE_PENALTY: f64 = 0.1;

/// Confidence grows with answer length (up to +0.3 at 1000 chars) and drops
/// 0.1 per distinct hedge phrase, clamped to `[0, 1]`.
pub fn confidence_score(answer: &str) -> f64 {
    let lower = answer.to_lowercase();
    let length_bonus = (answer.chars().count() as f64 / 1000.0).min(0.3);
    let hedges = HEDGES.iter().filter(|h| lower.contains(*h)).count() as f64;
    round2((BASE_CONFIDENCE + length_bonus - hedges * HEDGE_PENALTY).clamp(0.0, 1.0))
}

/// Share of the query's words echoed in the answer, boosted by 0.1 when
/// retrieved memories informed the prompt. An empty query scores 0.5.
pub fn relevance_score(query_words: &[String], answer: &str, used_memories: bool) -> f64 {
    let base = if query_words.is_empty() {
        0.5
    } else {
        keyword_relevance(query_words, answer)
    };
    let bonus = if used_memories { 0.1 } else { 0.0 };
    round2((base + bonus).min(1.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightup_memory::retrieval::query_words;

    #[test]
    fn hedging_lowers_confidence() {
        let plain = confidence_score("The capital of France is Paris.");
        let hedged = confidence_score("I think it might be Paris, maybe.");
        assert!(hedged < plain, "{hedged} >= {plain}");
        assert_eq!(hedged, 0.33);
    }

    #[test]
    fn long_answers_gain_confidence_up_to_a_cap() {
        assert_eq!(confidence_score(&"a".repeat(5000)), 0.9);
        assert_eq!(confidence_score(""), 0.6);
    }

    #[test]
    fn relevance_counts_query_words() {
        let words = query_words("rust borrow checker");
        assert_eq!(relevance_score(&words, "The borrow checker in Rust...", false), 1.0);
        assert_eq!(relevance_score(&words, "Checker pieces", false), 0.33);
        assert_eq!(relevance_score(&words, "Checker pieces", true), 0.43);
        assert_eq!(relevance_score(&[], "anything", false), 0.5);
    }
}
