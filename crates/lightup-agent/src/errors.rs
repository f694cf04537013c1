// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing wording for provider errors.

const QUOTA_MESSAGE: &str =
    "Your API quota has been exceeded. Check your plan and billing details with your provider.";
const RATE_LIMIT_MESSAGE: &str = "Too many requests right now. Please wait a moment and try again.";
const API_KEY_MESSAGE: &str =
    "There is a problem with your API key. Check that it is set correctly in settings.";

/// Replaces known failure messages with friendlier copy; others pass through.
///
/// Matching is case-insensitive and checks quota, then rate limit, then API key.
pub fn friendly_error(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("quota") {
        QUOTA_MESSAGE.to_string()
    } else if lower.contains("rate limit") {
        RATE_LIMIT_MESSAGE.to_string()
    } else if lower.contains("api key") {
        API_KEY_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}
