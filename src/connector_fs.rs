//! Filesystem corpus.
//!
//! Walks a root directory with `walkdir`, keeps files matching the include
//! globs (case-insensitive, default `**/*.md`), and prunes any directory
//! whose name is a dependency-environment marker (default `.venv`, `venv`)
//! or that matches an exclude glob. The tree is re-read on every call to
//! [`Corpus::documents`].
//!
//! A missing or unlistable root is an error. Anything below the root that
//! cannot be read is logged and skipped.

use anyhow::Result;
use docqa_core::corpus::{Corpus, CorpusError};
use docqa_core::models::Document;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::CorpusConfig;

#[derive(Debug, Clone)]
pub struct FsCorpus {
    root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
    exclude_dirs: Vec<String>,
    follow_symlinks: bool,
}

impl FsCorpus {
    /// A corpus rooted at `root` with default include/exclude rules.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let config = CorpusConfig {
            root: root.into(),
            ..CorpusConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &CorpusConfig) -> Result<Self> {
        Ok(Self {
            root: config.root.clone(),
            include_set: build_globset(&config.include_globs)?,
            exclude_set: build_globset(&config.exclude_globs)?,
            exclude_dirs: config.exclude_dirs.clone(),
            follow_symlinks: config.follow_symlinks,
        })
    }

    /// Matching file paths relative to the root, sorted.
    pub fn scan(&self) -> Result<Vec<PathBuf>, CorpusError> {
        self.check_root()?;

        let mut paths = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable path under corpus root");
                    continue;
                }
            };
            if !is_document_file(&entry) {
                continue;
            }

            let relative = self.relative(entry.path());
            if self.include_set.is_match(&relative) && !self.exclude_set.is_match(&relative) {
                paths.push(relative);
            }
        }

        paths.sort();
        tracing::debug!(root = %self.root.display(), files = paths.len(), "corpus scanned");
        Ok(paths)
    }

    fn check_root(&self) -> Result<(), CorpusError> {
        let metadata = std::fs::metadata(&self.root)
            .map_err(|e| CorpusError::from_root_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(CorpusError::Access {
                root: self.root.clone(),
                source: std::io::Error::other("not a directory"),
            });
        }
        std::fs::read_dir(&self.root).map_err(|e| CorpusError::from_root_io(&self.root, e))?;
        Ok(())
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if self.exclude_dirs.iter().any(|marker| *marker == name) {
            return true;
        }
        self.exclude_set.is_match(self.relative(entry.path()))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }
}

impl Corpus for FsCorpus {
    fn documents(&self) -> Result<Vec<Document>, CorpusError> {
        let mut docs = Vec::new();
        for relative in self.scan()? {
            let path = self.root.join(&relative);
            match std::fs::read_to_string(&path) {
                Ok(text) => docs.push(Document::new(relative, text)),
                Err(source) => {
                    let err = CorpusError::DocumentRead { path, source };
                    tracing::warn!("{}; skipping", err);
                }
            }
        }
        Ok(docs)
    }
}

/// Regular files, plus symlinks that resolve to one. `follow_symlinks`
/// only governs descent into linked directories.
fn is_document_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).case_insensitive(true).build()?);
    }
    Ok(builder.build()?)
}
