//! In-memory [`Corpus`] implementation for tests and embedding callers.

use std::path::PathBuf;

use crate::models::Document;

use super::{Corpus, CorpusError};

/// A fixed set of documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    docs: Vec<Document>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any existing one with the same path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        let doc = Document::new(path, text);
        match self.docs.iter_mut().find(|d| d.path == doc.path) {
            Some(existing) => *existing = doc,
            None => self.docs.push(doc),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl Corpus for MemoryCorpus {
    fn documents(&self) -> Result<Vec<Document>, CorpusError> {
        let mut docs = self.docs.clone();
        docs.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(docs)
    }
}
