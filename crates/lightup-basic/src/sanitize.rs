// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character allow-list applied to everything sent to the basic proxy.

/// Inclusive code point ranges that survive sanitization, besides printable ASCII.
const ALLOWED_RANGES: &[(u32, u32)] = &[
    (0x00A0, 0x024F), // Latin-1 supplement, Latin extended A/B
    (0x0370, 0x04FF), // Greek, Cyrillic
    (0x0590, 0x06FF), // Hebrew, Arabic
    (0x0900, 0x097F), // Devanagari
    (0x2000, 0x206F), // general punctuation
    (0x3040, 0x30FF), // Hiragana, Katakana
    (0x4E00, 0x9FFF), // CJK unified ideographs
    (0xAC00, 0xD7AF), // Hangul syllables
];

/// Whether `c` may be sent to the proxy.
///
/// Printable ASCII except `\`, the whitespace controls `\n`, `\t`, `\r`,
/// and the ranges in [`ALLOWED_RANGES`]. Everything outside the BMP is dropped.
pub fn is_allowed(c: char) -> bool {
    match c {
        '\\' => false,
        '\n' | '\t' | '\r' => true,
        ' '..='~' => true,
        _ => {
            let code = c as u32;
            ALLOWED_RANGES
                .iter()
                .any(|&(lo, hi)| (lo..=hi).contains(&code))
        }
    }
}

/// Removes every character the proxy does not accept.
pub fn sanitize_content(text: &str) -> String {
    text.chars().filter(|&c| is_allowed(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_common_scripts() {
        let text = "Hello, café! Привет שלום مرحبا नमस्ते こんにちは 漢字 한국어 “quotes”";
        assert_eq!(sanitize_content(text), text);
    }

    #[test]
    fn strips_backslash_emoji_and_controls() {
        assert_eq!(sanitize_content("a\\b 😀\u{0007}c\n"), "ab c\n");
    }

    proptest! {
        #[test]
        fn output_is_within_allow_list(input in any::<String>()) {
            let out = sanitize_content(&input);
            prop_assert!(!out.contains('\\'));
            prop_assert!(out.chars().all(|c| (c as u32) <= 0xFFFF));
            prop_assert!(out.chars().all(is_allowed));
            prop_assert_eq!(sanitize_content(&out), out.clone());
        }
    }
}
