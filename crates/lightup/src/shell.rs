// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lightup shell` command implementation.
//!
//! Launches an interactive REPL with colored prompt, streaming output and
//! readline history. The first line of a conversation is the text to work
//! on; every later line is a follow-up question about it.

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use lightup_agent::{AnnotatedChunk, ExportFormat, FollowUpSession, friendly_error};
use lightup_core::{LightupError, Mode};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::export::save_export;
use crate::runtime::Runtime;

/// A line typed at the prompt.
#[derive(Debug, PartialEq)]
enum ShellInput {
    Quit,
    Help,
    /// Start over with a fresh conversation.
    New,
    /// Switch mode; also starts a fresh conversation.
    Mode(Mode),
    Export {
        format: ExportFormat,
        path: Option<PathBuf>,
    },
    /// Text (no conversation yet) or a follow-up question.
    Message(String),
    Invalid(String),
}

fn parse_input(line: &str) -> Option<ShellInput> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Some(ShellInput::Message(trimmed.to_string()));
    };

    let mut words = command.split_whitespace();
    let input = match words.next().unwrap_or_default() {
        "quit" | "exit" => ShellInput::Quit,
        "help" => ShellInput::Help,
        "new" => ShellInput::New,
        "mode" => match words.next().map(str::parse::<Mode>) {
            Some(Ok(mode)) => ShellInput::Mode(mode),
            _ => ShellInput::Invalid(
                "usage: /mode explain|summarize|analyze|translate|free".to_string(),
            ),
        },
        "export" => match words.next().unwrap_or("markdown").parse::<ExportFormat>() {
            Ok(format) => ShellInput::Export {
                format,
                path: words.next().map(PathBuf::from),
            },
            Err(_) => ShellInput::Invalid(
                "usage: /export [markdown|text|json|html] [path]".to_string(),
            ),
        },
        other => ShellInput::Invalid(format!("unknown command /{other}, try /help")),
    };
    Some(input)
}

fn print_help() {
    println!("  {}  start a new conversation", "/new".yellow());
    println!("  {}  switch mode and start over", "/mode <mode>".yellow());
    println!(
        "  {}  save the conversation",
        "/export [format] [path]".yellow()
    );
    println!("  {}  leave the shell", "/quit".yellow());
    println!("Anything else is text to work on, then follow-up questions about it.");
}

fn print_chunk(chunk: &AnnotatedChunk) {
    if let Some(text) = chunk.text() {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// Runs the `lightup shell` interactive REPL.
pub async fn run_shell(runtime: &Runtime, mode: Mode) -> Result<(), LightupError> {
    runtime.ensure_enabled().await?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| LightupError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "lightup shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let mut mode = mode;
    let mut session: Option<FollowUpSession> = None;

    loop {
        let prompt = match &session {
            Some(_) => format!("{}> ", "follow-up".cyan()),
            None => format!("{}> ", mode.to_string().green()),
        };
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };
        let Some(input) = parse_input(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.trim());

        match input {
            ShellInput::Quit => break,
            ShellInput::Help => print_help(),
            ShellInput::New => {
                session = None;
                println!("{}", "new conversation".dimmed());
            }
            ShellInput::Mode(new_mode) => {
                mode = new_mode;
                session = None;
                println!("{}", format!("mode: {mode}").dimmed());
            }
            ShellInput::Export { format, path } => match &session {
                Some(current) => match save_export(runtime, &current.export(), format, path.as_deref()).await {
                    Ok(Some(path)) => println!("{}", format!("saved {}", path.display()).dimmed()),
                    Ok(None) => {}
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                },
                None => eprintln!("{}", "nothing to export yet".yellow()),
            },
            ShellInput::Invalid(message) => eprintln!("{}", message.yellow()),
            ShellInput::Message(text) => match session.as_mut() {
                None => {
                    match FollowUpSession::start(
                        runtime.processor.clone(),
                        &text,
                        mode,
                        runtime.debounce(),
                        print_chunk,
                    )
                    .await
                    {
                        Ok(started) => {
                            println!();
                            session = Some(started);
                        }
                        Err(e) => report(&e),
                    }
                }
                Some(current) => {
                    let result = current.ask(&text, print_chunk).await.map(|qa| qa.id);
                    println!();
                    match result {
                        Ok(id) => debug!(id, "follow-up complete"),
                        Err(e) => report(&e),
                    }
                }
            },
        }
    }

    Ok(())
}

fn report(e: &LightupError) {
    println!();
    match e {
        LightupError::RateLimited { message } => eprintln!("{}", message.yellow()),
        _ => eprintln!("{}: {}", "error".red(), friendly_error(&e.to_string())),
    }
}
