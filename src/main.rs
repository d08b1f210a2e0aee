//! # docqa CLI
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docqa ask "<question>"` | Answer one question with citations |
//! | `docqa chat` | Interactive question loop with session history |
//! | `docqa search "<query>"` | Show ranked evidence chunks |
//! | `docqa sources` | List discovered documents and chunk counts |
//!
//! ## Examples
//!
//! ```bash
//! # Ask about the notes in the current directory
//! docqa ask "what is the release process"
//!
//! # Use another notes directory and save the session
//! docqa --root ~/notes chat --transcript session.json
//!
//! # Inspect ranking as JSON
//! docqa search "release checklist" --json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docqa::{ask, config, search, sources};

/// docqa: answer questions from local Markdown notes.
#[derive(Parser)]
#[command(
    name = "docqa",
    about = "docqa: answer questions from local Markdown notes with cited snippets",
    version,
    long_about = "docqa scans a directory for Markdown files, splits them at headings, \
    ranks sections by word overlap with your question, and prints the best-matching \
    lines with source citations. Nothing is indexed or stored between runs."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/docqa.toml` when that file exists; otherwise
    /// built-in defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus root directory. Overrides `[corpus].root`.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question.
    ///
    /// Prints the cited answer, or the clarification message when nothing
    /// in the corpus matches.
    Ask {
        /// The question text.
        question: String,

        /// Print question, answer, and evidence as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Ask questions interactively.
    ///
    /// Reads one question per line from stdin. `q`, `quit`, `exit`, or
    /// end of input ends the session.
    Chat {
        /// Write the answered questions to this file as JSON on exit.
        #[arg(long)]
        transcript: Option<PathBuf>,
    },

    /// Show the ranked evidence chunks for a query.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of chunks to show (defaults to `[retrieval].top_k`).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List discovered documents with line and chunk counts.
    Sources,
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let mut cfg = config::resolve_config(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        cfg.corpus.root = root;
    }
    tracing::debug!(root = %cfg.corpus.root.display(), "configuration loaded");

    match cli.command {
        Commands::Ask { question, json } => {
            ask::run_ask(&cfg, &question, json)?;
        }
        Commands::Chat { transcript } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            ask::run_chat(&cfg, stdin.lock(), stdout.lock(), transcript.as_deref())?;
        }
        Commands::Search { query, limit, json } => {
            search::run_search(&cfg, &query, limit, json)?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
    }

    Ok(())
}
