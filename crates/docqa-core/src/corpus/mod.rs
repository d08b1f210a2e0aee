//! Corpus abstraction for docqa.
//!
//! The [`Corpus`] trait is the only way documents enter the query cycle.
//! Implementations re-read their backing source on every call; nothing is
//! cached between queries.

pub mod memory;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Document;

/// Errors raised while reading a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus root does not exist.
    #[error("corpus root not found: {root}")]
    NotFound { root: PathBuf },

    /// The corpus root exists but cannot be listed.
    #[error("cannot access corpus root {root}: {source}")]
    Access {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single document could not be read or decoded.
    ///
    /// Scanners report this and skip the file; it never ends a query.
    #[error("cannot read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    /// Classify an I/O failure on the corpus root.
    pub fn from_root_io(root: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let root = root.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { root }
        } else {
            Self::Access { root, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A source of documents for one query cycle.
pub trait Corpus {
    /// Read every document currently in the corpus.
    ///
    /// Unreadable individual documents are skipped; only failure to reach
    /// the corpus as a whole is an error.
    fn documents(&self) -> Result<Vec<Document>, CorpusError>;
}

impl<C: Corpus + ?Sized> Corpus for &C {
    fn documents(&self) -> Result<Vec<Document>, CorpusError> {
        (**self).documents()
    }
}
