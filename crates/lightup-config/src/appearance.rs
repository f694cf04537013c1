// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Font size scale derived from the user's base font size.

use serde::Serialize;

/// Used when the configured size cannot be parsed.
const FALLBACK_BASE_PX: f64 = 15.0;

/// A type scale where every step is a multiple of `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSizeMapping {
    pub xs: String,
    pub sm: String,
    pub base: String,
    pub lg: String,
    pub xl: String,
    pub xxl: String,
}

/// Builds the scale for a CSS length such as `"16px"`, `"1rem"` or `"15"`.
///
/// The `base` step is the input itself (a bare number gets `px`); an
/// unparsable input falls back to 15px.
pub fn create_font_size_mapping(base_size: &str) -> FontSizeMapping {
    let (value, unit) = parse_length(base_size).unwrap_or((FALLBACK_BASE_PX, "px"));
    let step = |factor: f64| format_length(value * factor, unit);

    FontSizeMapping {
        xs: step(0.75),
        sm: step(0.875),
        base: step(1.0),
        lg: step(1.125),
        xl: step(1.25),
        xxl: step(1.5),
    }
}

fn parse_length(input: &str) -> Option<(f64, &str)> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let value: f64 = number.parse().ok()?;
    if !(value.is_finite() && value > 0.0) {
        return None;
    }
    match unit {
        "" => Some((value, "px")),
        "px" | "rem" | "em" | "pt" => Some((value, unit)),
        _ => None,
    }
}

fn format_length(value: f64, unit: &str) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let mut number = format!("{rounded:.3}");
    while number.ends_with('0') {
        number.pop();
    }
    if number.ends_with('.') {
        number.pop();
    }
    format!("{number}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base_is_preserved() {
        assert_eq!(create_font_size_mapping("16px").base, "16px");
        assert_eq!(create_font_size_mapping("1.5rem").base, "1.5rem");
    }

    #[test]
    fn steps_scale_from_base() {
        let mapping = create_font_size_mapping("16px");
        assert_eq!(mapping.xs, "12px");
        assert_eq!(mapping.sm, "14px");
        assert_eq!(mapping.lg, "18px");
        assert_eq!(mapping.xl, "20px");
        assert_eq!(mapping.xxl, "24px");
    }

    #[test]
    fn fractional_steps_are_trimmed() {
        let mapping = create_font_size_mapping("15px");
        assert_eq!(mapping.xs, "11.25px");
        assert_eq!(mapping.sm, "13.125px");
    }

    #[test]
    fn bare_number_gets_px() {
        assert_eq!(create_font_size_mapping("14").base, "14px");
    }

    #[test]
    fn garbage_falls_back_to_default() {
        assert_eq!(create_font_size_mapping("large").base, "15px");
        assert_eq!(create_font_size_mapping("0px").base, "15px");
    }

    proptest! {
        #[test]
        fn integer_px_base_round_trips(px in 1u32..200) {
            let input = format!("{px}px");
            prop_assert_eq!(create_font_size_mapping(&input).base, input);
        }
    }
}
