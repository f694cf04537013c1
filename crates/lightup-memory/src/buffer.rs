// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Importance scoring and window trimming.

use lightup_core::Message;

/// Score every message starts from.
const BASE_IMPORTANCE: f64 = 5.0;
const QUESTION_BONUS: f64 = 2.0;
const PER_ENTITY_BONUS: f64 = 0.5;
const LONG_MESSAGE_BONUS: f64 = 1.0;
/// Messages longer than this many characters get [`LONG_MESSAGE_BONUS`].
const LONG_MESSAGE_CHARS: usize = 500;
const MAX_IMPORTANCE: f64 = 10.0;

/// Subtracted from a message's importance once per newer message in the window.
pub const RECENCY_PENALTY: f64 = 0.1;

/// Heuristic importance of a message in `0.0..=10.0`.
pub fn calculate_importance(content: &str, entity_count: usize) -> f64 {
    let mut score = BASE_IMPORTANCE;
    if content.contains('?') {
        score += QUESTION_BONUS;
    }
    score += PER_ENTITY_BONUS * entity_count as f64;
    if content.chars().count() > LONG_MESSAGE_CHARS {
        score += LONG_MESSAGE_BONUS;
    }
    score.min(MAX_IMPORTANCE)
}

/// Keeps the `size` highest-scoring messages of `window`, oldest first.
///
/// A message scores its importance minus [`RECENCY_PENALTY`] per position
/// away from the newest. Ties keep the older message.
pub fn intelligent_trim(window: &[Message], size: usize) -> Vec<Message> {
    let newest = window.len().saturating_sub(1);
    let mut ranked: Vec<(usize, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, m)| (i, m.importance - RECENCY_PENALTY * (newest - i) as f64))
        .collect();

    // sort_by is stable, so equal scores stay in chronological order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(size);

    let mut keep: Vec<usize> = ranked.into_iter().map(|(i, _)| i).collect();
    keep.sort_unstable();
    keep.into_iter().map(|i| window[i].clone()).collect()
}
