// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword heuristics that adjust [`UserPreferences`] from user messages.

use crate::entities::ExtractedEntity;
use crate::types::{ExpertiseLevel, ResponseStyle, UserPreferences};

const BEGINNER_CUES: &[&str] = &[
    "simpler",
    "simple terms",
    "eli5",
    "like i'm five",
    "beginner",
    "layman",
];
const EXPERT_CUES: &[&str] = &["technical", "in depth", "advanced", "under the hood"];
const DETAILED_CUES: &[&str] = &["in detail", "more detail", "elaborate", "step by step"];
const CONCISE_CUES: &[&str] = &["briefly", "tl;dr", "tldr", "in short", "shorter"];

const MAX_INTERESTS: usize = 10;

/// Updates `preferences` from one user message and the entities found in it.
///
/// Returns true when anything changed.
pub fn update_user_preferences(
    preferences: &mut UserPreferences,
    content: &str,
    entities: &[ExtractedEntity],
) -> bool {
    let before = preferences.clone();
    let lower = content.to_lowercase();
    let mentions = |cues: &[&str]| cues.iter().any(|cue| lower.contains(cue));

    if mentions(BEGINNER_CUES) {
        preferences.expertise_level = ExpertiseLevel::Beginner;
    } else if mentions(EXPERT_CUES) {
        preferences.expertise_level = ExpertiseLevel::Expert;
    }

    if mentions(CONCISE_CUES) {
        preferences.response_style = ResponseStyle::Concise;
    } else if mentions(DETAILED_CUES) {
        preferences.response_style = ResponseStyle::Detailed;
    }

    for entity in entities {
        preferences
            .interests
            .retain(|i| !i.eq_ignore_ascii_case(&entity.name));
        preferences.interests.insert(0, entity.name.clone());
    }
    preferences.interests.truncate(MAX_INTERESTS);

    *preferences != before
}
