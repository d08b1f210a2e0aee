//! Lexical scoring and ranking.
//!
//! # Scoring
//!
//! A chunk's score is the number of distinct tokens it shares with the
//! query: `|tokenize(query) ∩ tokenize(chunk.text)|`. Frequency is ignored.
//!
//! # Ranking
//!
//! 1. Score every candidate chunk.
//! 2. Sort by score (desc), source path (asc), start line (asc).
//! 3. Drop chunks with score 0.
//! 4. Truncate to `top_k`.
//!
//! An empty query token set scores 0 everywhere, so ranking yields nothing.

use crate::models::{Chunk, ScoredChunk};
use crate::tokenize::{overlap, tokenize, TokenSet};

/// Default number of chunks handed to the answer synthesizer.
pub const DEFAULT_TOP_K: usize = 3;

/// Ranking parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum number of chunks kept after filtering.
    pub top_k: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Score one chunk's text against the query tokens.
pub fn score_text(query_tokens: &TokenSet, text: &str) -> usize {
    if query_tokens.is_empty() {
        return 0;
    }
    overlap(query_tokens, &tokenize(text))
}

/// Score every chunk without filtering or truncation, in input order.
pub fn score_all(query_tokens: &TokenSet, chunks: Vec<Chunk>) -> Vec<ScoredChunk> {
    chunks
        .into_iter()
        .map(|chunk| {
            let score = score_text(query_tokens, &chunk.text);
            ScoredChunk { chunk, score }
        })
        .collect()
}

/// Score, sort, filter to positive scores, and truncate to `params.top_k`.
pub fn rank(
    query_tokens: &TokenSet,
    chunks: Vec<Chunk>,
    params: &SearchParams,
) -> Vec<ScoredChunk> {
    let mut scored = score_all(query_tokens, chunks);

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.chunk.source_path.cmp(&b.chunk.source_path))
            .then_with(|| a.chunk.start_line.cmp(&b.chunk.start_line))
    });

    scored.retain(|c| c.score > 0);
    scored.truncate(params.top_k);
    scored
}
