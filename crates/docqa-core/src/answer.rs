//! Answer synthesis from ranked evidence chunks.
//!
//! For each chunk, in rank order:
//!
//! 1. Take its non-blank lines.
//! 2. Keep the lines that share at least one token with the query.
//! 3. If none qualify, fall back to the first `fallback_lines` non-blank lines.
//! 4. Keep at most `max_lines_per_chunk` lines and join them with `\n`.
//! 5. Append a citation line: `<label>: <path>:<start_line>`.
//!
//! Blocks are joined with a blank line.

use crate::models::ScoredChunk;
use crate::tokenize::{tokenize, TokenSet};

/// Fixed reply when no chunk matches the query.
pub const CLARIFICATION: &str =
    "no relevant content found; please provide a more specific keyword or context.";

/// Parameters controlling how much of each chunk ends up in the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerParams {
    pub max_lines_per_chunk: usize,
    pub fallback_lines: usize,
    pub citation_label: String,
}

impl Default for AnswerParams {
    fn default() -> Self {
        Self {
            max_lines_per_chunk: 5,
            fallback_lines: 3,
            citation_label: "source".to_string(),
        }
    }
}

/// Compose a cited answer from `chunks`.
///
/// Callers route an empty `chunks` list to the clarification branch; given
/// one anyway, this returns an empty string.
pub fn synthesize(
    query_tokens: &TokenSet,
    chunks: &[ScoredChunk],
    params: &AnswerParams,
) -> String {
    chunks
        .iter()
        .map(|sc| {
            let lines = select_lines(query_tokens, &sc.chunk.text, params);
            format!(
                "{}\n{}: {}",
                lines.join("\n"),
                params.citation_label,
                sc.chunk.citation()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pick the lines of `text` that best show why it matched.
pub fn select_lines<'a>(
    query_tokens: &TokenSet,
    text: &'a str,
    params: &AnswerParams,
) -> Vec<&'a str> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let matching: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| {
            let line_tokens = tokenize(line);
            query_tokens.iter().any(|t| line_tokens.contains(t))
        })
        .collect();

    let selected: Vec<&str> = if matching.is_empty() {
        lines.into_iter().take(params.fallback_lines).collect()
    } else {
        matching
    };

    selected.into_iter().take(params.max_lines_per_chunk).collect()
}
