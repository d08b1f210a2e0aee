//! Core data models used throughout docqa.
//!
//! These types represent the documents, chunks, and interaction records
//! that flow through a single query cycle.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document read from the corpus, before chunking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the corpus root.
    pub path: PathBuf,
    /// Full UTF-8 text, line terminators included.
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A contiguous, heading-delimited span of one document.
///
/// `start_line` and `end_line` are 1-based and inclusive. `text` is the
/// byte-exact concatenation of the spanned lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub source_path: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl Chunk {
    /// `path:start_line`, the form used in citations.
    pub fn citation(&self) -> String {
        format!("{}:{}", self.source_path.display(), self.start_line)
    }
}

/// A chunk paired with its overlap score for the current query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: Chunk,
    pub score: usize,
}

/// One answered question, kept for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}
