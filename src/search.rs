//! Ranked evidence lookup.
//!
//! Runs only the `retrieve` state and prints the ranked chunks instead of
//! a synthesized answer. Useful for checking why a question does or does
//! not match.

use anyhow::{bail, Result};
use docqa_core::models::ScoredChunk;
use docqa_core::Engine;

use crate::config::Config;
use crate::connector_fs::FsCorpus;

/// Core search function returning structured data.
pub fn search_chunks(config: &Config, query: &str, limit: Option<usize>) -> Result<Vec<ScoredChunk>> {
    let mut params = config.engine_params();
    if let Some(limit) = limit {
        if limit == 0 {
            bail!("--limit must be >= 1");
        }
        params.search.top_k = limit;
    }

    let engine = Engine::new(params);
    let corpus = FsCorpus::from_config(&config.corpus)?;
    let retrieval = engine.retrieve(&corpus, query)?;
    Ok(retrieval.chunks().to_vec())
}

pub fn run_search(config: &Config, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let results = search_chunks(config, query, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        let chunk = &result.chunk;
        let first_line = chunk
            .text
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .trim();
        println!(
            "{}. [{}] {}:{}-{}",
            i + 1,
            result.score,
            chunk.source_path.display(),
            chunk.start_line,
            chunk.end_line
        );
        println!("    excerpt: \"{}\"", first_line);
        println!();
    }

    Ok(())
}
