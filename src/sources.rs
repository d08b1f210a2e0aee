use anyhow::Result;
use docqa_core::chunk::chunk_document;
use docqa_core::corpus::Corpus;

use crate::config::Config;
use crate::connector_fs::FsCorpus;

/// One discovered document and how it chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: String,
    pub lines: usize,
    pub chunks: usize,
}

pub fn list_source_entries(config: &Config) -> Result<Vec<SourceEntry>> {
    let corpus = FsCorpus::from_config(&config.corpus)?;
    let docs = corpus.documents()?;

    Ok(docs
        .iter()
        .map(|doc| SourceEntry {
            path: doc.path.display().to_string(),
            lines: doc.text.split_inclusive('\n').count(),
            chunks: chunk_document(doc, &config.chunking.heading_sigil).len(),
        })
        .collect())
}

pub fn list_sources(config: &Config) -> Result<()> {
    let entries = list_source_entries(config)?;

    println!("{:<48} {:>7} {:>7}", "DOCUMENT", "LINES", "CHUNKS");
    for entry in &entries {
        println!("{:<48} {:>7} {:>7}", entry.path, entry.lines, entry.chunks);
    }
    println!("{} document(s)", entries.len());

    Ok(())
}
