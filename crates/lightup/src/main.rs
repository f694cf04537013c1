// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LightUp - explain, summarize, analyze and translate text with a model of
//! your choice, remembering the conversation between requests.
//!
//! This is the binary entry point.

mod context;
mod export;
mod process;
mod runtime;
mod settings;
mod shell;
mod usage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lightup_agent::ExportFormat;
use lightup_core::{LightupError, Mode};

use crate::runtime::Runtime;

/// LightUp - AI answers for selected text.
#[derive(Parser, Debug)]
#[command(name = "lightup", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one piece of text and exit.
    Process {
        /// What to do with the text.
        #[arg(long, short, default_value_t = Mode::Explain)]
        mode: Mode,
        /// The text; read from stdin when omitted.
        #[arg(long, short)]
        text: Option<String>,
        /// Print each chunk as a JSON line instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Launch an interactive session with follow-up questions.
    Shell {
        #[arg(long, short, default_value_t = Mode::Explain)]
        mode: Mode,
    },
    /// Inspect or change the stored user settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Inspect or clear the conversation memory.
    Context {
        #[command(subcommand)]
        action: ContextCommands,
    },
    /// Show today's usage of the basic model.
    Usage {
        #[arg(long)]
        json: bool,
    },
    /// Answer text plus follow-up questions and save the conversation.
    Export {
        #[arg(long, short, default_value_t = Mode::Explain)]
        mode: Mode,
        /// The text; read from stdin when omitted.
        #[arg(long, short)]
        text: Option<String>,
        /// A follow-up question; may be repeated.
        #[arg(long = "ask", short = 'q')]
        questions: Vec<String>,
        /// markdown (md), text (txt), json or html.
        #[arg(long, short, default_value = "markdown")]
        format: ExportFormat,
        /// Write here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    /// Print the settings (API keys masked).
    Show {
        /// Print API keys in full.
        #[arg(long)]
        reveal: bool,
    },
    /// Update settings from `key=value` pairs or one JSON object.
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Restore every setting to its default.
    Reset,
    /// Turn LightUp on.
    Enable,
    /// Turn LightUp off; `process`, `shell` and `export` refuse to run.
    Disable,
    /// Choose the languages used by translate mode.
    Translate {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Set the interface locale.
    Locale { locale: String },
    /// Choose the modes offered first.
    Modes {
        #[arg(required = true)]
        modes: Vec<Mode>,
    },
}

#[derive(Subcommand, Debug)]
enum ContextCommands {
    /// Print memory statistics, tracked entities and recent turns.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Forget the whole conversation.
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lightup_config::load_and_validate_path(path),
        None => lightup_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lightup_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let Some(command) = cli.command else {
        println!("lightup: use --help for available commands");
        return;
    };

    let runtime = match Runtime::open(config).await {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = run(command, &runtime).await;
    // Memory is written after the answer; let it land before exiting.
    runtime.processor.flush_memory().await;
    if let Err(e) = result {
        eprintln!("error: {}", lightup_agent::friendly_error(&e.to_string()));
        std::process::exit(1);
    }
}

async fn run(command: Commands, runtime: &Runtime) -> Result<(), LightupError> {
    match command {
        Commands::Process { mode, text, json } => {
            let text = read_input(text)?;
            process::run_process(runtime, mode, &text, json).await
        }
        Commands::Shell { mode } => shell::run_shell(runtime, mode).await,
        Commands::Settings { action } => settings::run_settings(runtime, action).await,
        Commands::Context { action } => match action {
            ContextCommands::Show { json } => context::run_show(runtime, json).await,
            ContextCommands::Clear => context::run_clear(runtime).await,
        },
        Commands::Usage { json } => usage::run_usage(runtime, json).await,
        Commands::Export {
            mode,
            text,
            questions,
            format,
            output,
        } => {
            let text = read_input(text)?;
            export::run_export(runtime, mode, &text, &questions, format, output.as_deref()).await
        }
    }
}

/// Returns `text`, or all of stdin when it was not given.
fn read_input(text: Option<String>) -> Result<String, LightupError> {
    let text = match text {
        Some(text) => text,
        None => std::io::read_to_string(std::io::stdin())
            .map_err(|e| LightupError::Internal(format!("failed to read stdin: {e}")))?,
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(LightupError::Internal("no text to process".to_string()));
    }
    Ok(text.to_string())
}

/// Logs go to stderr so stdout carries only model output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lightup={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
