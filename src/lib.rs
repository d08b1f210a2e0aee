//! # docqa
//!
//! Answer questions from local Markdown notes with lexical retrieval and
//! cited snippets.
//!
//! Each question runs one cycle of a two-state machine: `retrieve` scans
//! the corpus root, splits documents at headings, and ranks sections by
//! token overlap with the question; then either `answer` composes the
//! best-matching lines with `source: path:line` citations, or `clarify`
//! asks for a more specific question.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────┐   ┌────────────────┐
//! │  FsCorpus   │──▶│ chunk → tokenize →   │──▶│ answer/clarify │
//! │  (walkdir)  │   │ score → rank (top 3) │   │  + history     │
//! └─────────────┘   └──────────────────────┘   └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! docqa ask "how do I deploy"      # one question, cited answer
//! docqa chat                        # interactive session
//! docqa search "deploy" --json     # ranked evidence only
//! docqa sources                     # documents and chunk counts
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`connector_fs`] | Filesystem corpus |
//! | [`ask`] | Query cycles, sessions, `ask` and `chat` |
//! | [`search`] | Ranked evidence lookup |
//! | [`sources`] | Document listing |

pub mod ask;
pub mod config;
pub mod connector_fs;
pub mod search;
pub mod sources;

pub use ask::{answer_query, Session};
