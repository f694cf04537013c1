// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation export as Markdown, plain text, JSON or a standalone HTML page.

use std::fmt::Write as _;

use lightup_config::{FontSizeMapping, create_font_size_mapping};
use lightup_core::{LightupError, Mode};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::follow_up::FollowUpQA;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[strum(to_string = "markdown", serialize = "md")]
    Markdown,
    #[strum(to_string = "text", serialize = "txt")]
    Text,
    Json,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }
}

/// Everything an export contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationExport {
    pub original_text: String,
    pub mode: Mode,
    pub main_answer: String,
    #[serde(default)]
    pub follow_ups: Vec<FollowUpQA>,
}

impl ConversationExport {
    /// Follow-ups that finished streaming; partial answers are left out.
    fn answered(&self) -> impl Iterator<Item = &FollowUpQA> {
        self.follow_ups.iter().filter(|qa| qa.is_complete)
    }
}

/// Renders `conversation` in `format`.
///
/// `font_size` (e.g. `"16px"`) sizes the HTML page; other formats ignore it.
pub fn export_conversation(
    conversation: &ConversationExport,
    format: ExportFormat,
    font_size: &str,
) -> Result<String, LightupError> {
    Ok(match format {
        ExportFormat::Markdown => to_markdown(conversation),
        ExportFormat::Text => to_text(conversation),
        ExportFormat::Json => serde_json::to_string_pretty(conversation)?,
        ExportFormat::Html => to_html(conversation, &create_font_size_mapping(font_size)),
    })
}

fn mode_title(mode: Mode) -> &'static str {
    match mode {
        Mode::Explain => "Explanation",
        Mode::Summarize => "Summary",
        Mode::Analyze => "Analysis",
        Mode::Translate => "Translation",
        Mode::Free => "Answer",
    }
}

fn to_markdown(c: &ConversationExport) -> String {
    let mut out = String::from("# LightUp conversation\n\n## Original text\n\n");
    for line in c.original_text.lines() {
        let _ = writeln!(out, "> {line}");
    }
    let _ = write!(out, "\n## {}\n\n{}\n", mode_title(c.mode), c.main_answer.trim());

    let mut answered = c.answered().peekable();
    if answered.peek().is_some() {
        out.push_str("\n## Follow-up questions\n");
        for qa in answered {
            let _ = write!(out, "\n### {}\n\n{}\n", qa.question.trim(), qa.answer.trim());
        }
    }
    out
}

fn to_text(c: &ConversationExport) -> String {
    let mut out = format!(
        "ORIGINAL TEXT\n\n{}\n\n{}\n\n{}\n",
        c.original_text.trim(),
        mode_title(c.mode).to_uppercase(),
        c.main_answer.trim()
    );
    for (n, qa) in c.answered().enumerate() {
        let _ = write!(
            out,
            "\nFOLLOW-UP {}\nQ: {}\nA: {}\n",
            n + 1,
            qa.question.trim(),
            qa.answer.trim()
        );
    }
    out
}

fn to_html(c: &ConversationExport, fonts: &FontSizeMapping) -> String {
    let mut body = format!(
        "<h1>LightUp conversation</h1>\n<h2>Original text</h2>\n<blockquote>{}</blockquote>\n<h2>{}</h2>\n{}\n",
        paragraphs(&c.original_text),
        mode_title(c.mode),
        paragraphs(&c.main_answer)
    );
    let mut answered = c.answered().peekable();
    if answered.peek().is_some() {
        body.push_str("<h2>Follow-up questions</h2>\n");
        for qa in answered {
            let _ = write!(
                body,
                "<section class=\"follow-up\">\n<h3>{}</h3>\n{}\n</section>\n",
                escape_html(qa.question.trim()),
                paragraphs(&qa.answer)
            );
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>LightUp conversation</title>\n<style>\n\
         body {{ font-family: system-ui, sans-serif; font-size: {base}; line-height: 1.6; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #1f2328; }}\n\
         h1 {{ font-size: {xxl}; }}\n\
         h2 {{ font-size: {xl}; margin-top: 2rem; }}\n\
         h3 {{ font-size: {lg}; }}\n\
         blockquote {{ font-size: {sm}; border-left: 3px solid #d0d7de; margin: 0; padding-left: 1rem; color: #57606a; }}\n\
         </style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        base = fonts.base,
        xxl = fonts.xxl,
        xl = fonts.xl,
        lg = fonts.lg,
        sm = fonts.sm,
    )
}

/// Blank-line separated blocks become `<p>`; single newlines become `<br>`.
fn paragraphs(text: &str) -> String {
    text.trim()
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            let lines: Vec<String> = block.trim().lines().map(escape_html).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn conversation() -> ConversationExport {
        ConversationExport {
            original_text: "Rust is <fast>.".into(),
            mode: Mode::Explain,
            main_answer: "It compiles to native code.\n\nNo GC.".into(),
            follow_ups: vec![
                FollowUpQA {
                    id: 1,
                    question: "Why no GC?".into(),
                    answer: "Ownership.".into(),
                    is_complete: true,
                    history_updated: true,
                },
                FollowUpQA {
                    id: 2,
                    question: "Still streaming".into(),
                    answer: "Par".into(),
                    is_complete: false,
                    history_updated: false,
                },
            ],
        }
    }

    #[test]
    fn markdown_quotes_original_and_lists_answered_follow_ups() {
        let md = export_conversation(&conversation(), ExportFormat::Markdown, "16px").unwrap();
        assert!(md.starts_with("# LightUp conversation\n\n## Original text\n\n> Rust is <fast>.\n"));
        assert!(md.contains("## Explanation\n\nIt compiles to native code.\n\nNo GC.\n"));
        assert!(md.contains("### Why no GC?\n\nOwnership.\n"));
        assert!(!md.contains("Still streaming"));
    }

    #[test]
    fn text_numbers_follow_ups() {
        let text = export_conversation(&conversation(), ExportFormat::Text, "16px").unwrap();
        assert!(text.contains("EXPLANATION\n\nIt compiles"));
        assert!(text.contains("FOLLOW-UP 1\nQ: Why no GC?\nA: Ownership.\n"));
        assert!(!text.contains("FOLLOW-UP 2"));
    }

    #[test]
    fn json_keeps_every_follow_up() {
        let json = export_conversation(&conversation(), ExportFormat::Json, "16px").unwrap();
        let parsed: ConversationExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, conversation());
        assert!(json.contains("\"isComplete\": false"));
    }

    #[test]
    fn html_is_escaped_and_sized_from_base_font() {
        let html = export_conversation(&conversation(), ExportFormat::Html, "16px").unwrap();
        assert!(html.contains("Rust is &lt;fast&gt;."));
        assert!(html.contains("font-size: 16px;"));
        assert!(html.contains("<p>It compiles to native code.</p>\n<p>No GC.</p>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn formats_parse_from_names_and_extensions() {
        assert_eq!(ExportFormat::from_str("md").unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_str("html").unwrap(), ExportFormat::Html);
        assert_eq!(ExportFormat::Text.extension(), "txt");
        assert!(ExportFormat::from_str("pdf").is_err());
    }
}
