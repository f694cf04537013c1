// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regex-based entity extraction.
//!
//! Three patterns: capitalized word runs (people), capitalized phrases after
//! a locative preposition (places) and all-caps words (organizations). Plenty
//! of false positives get through; sentence-initial words are the usual
//! culprits.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Entity, EntityType};

static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in|at|from|to|near)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap()
});

static ORGANIZATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,}(?:\s+[A-Z]{2,})*)\b").unwrap());

static PERSON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)\b").unwrap());

/// Longest excerpt kept as an entity description.
const DESCRIPTION_CHARS: usize = 100;

/// A name found in one message, before it is merged into the tracked set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntity {
    pub name: String,
    pub entity_type: EntityType,
}

/// Extracts candidate entities from `text`.
///
/// A name matched by more than one pattern keeps the first type in the
/// order location, organization, person.
pub fn extract_entities(text: &str) -> Vec<ExtractedEntity> {
    let mut found: Vec<ExtractedEntity> = Vec::new();
    let patterns = [
        (&*LOCATION_PATTERN, EntityType::Location),
        (&*ORGANIZATION_PATTERN, EntityType::Organization),
        (&*PERSON_PATTERN, EntityType::Person),
    ];

    for (pattern, entity_type) in patterns {
        for captures in pattern.captures_iter(text) {
            let Some(name) = captures.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if found.iter().any(|e| e.name == name) {
                continue;
            }
            found.push(ExtractedEntity {
                name: name.to_string(),
                entity_type,
            });
        }
    }
    found
}

/// Merges the entities of one message into the tracked set.
///
/// Known names (case-insensitive) get their mention count bumped; new ones
/// are appended with an excerpt of `content` as description.
pub fn merge_entities(
    tracked: &mut Vec<Entity>,
    extracted: &[ExtractedEntity],
    message_index: usize,
    content: &str,
) {
    for candidate in extracted {
        match tracked
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(&candidate.name))
        {
            Some(entity) => {
                entity.mentions += 1;
                entity.last_mentioned_index = message_index;
            }
            None => tracked.push(Entity {
                name: candidate.name.clone(),
                entity_type: candidate.entity_type,
                mentions: 1,
                last_mentioned_index: message_index,
                description: excerpt(content, DESCRIPTION_CHARS),
            }),
        }
    }
}

/// The first `max_chars` characters of `text`, with `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", trimmed[..cut].trim_end()),
        None => trimmed.to_string(),
    }
}
