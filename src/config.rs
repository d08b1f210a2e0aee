//! TOML configuration.
//!
//! Every field has a default, so an absent file and an empty file both
//! yield [`Config::default`]. See `config/docqa.example.toml`.

use anyhow::{bail, Context, Result};
use docqa_core::answer::{AnswerParams, CLARIFICATION};
use docqa_core::chunk::DEFAULT_HEADING_SIGIL;
use docqa_core::search::{SearchParams, DEFAULT_TOP_K};
use docqa_core::EngineParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/docqa.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub answer: AnswerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_globs: default_include_globs(),
            exclude_dirs: default_exclude_dirs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}
fn default_exclude_dirs() -> Vec<String> {
    vec![".venv".to_string(), "venv".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_heading_sigil")]
    pub heading_sigil: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            heading_sigil: default_heading_sigil(),
        }
    }
}

fn default_heading_sigil() -> String {
    DEFAULT_HEADING_SIGIL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnswerConfig {
    #[serde(default = "default_max_lines")]
    pub max_lines_per_chunk: usize,
    #[serde(default = "default_fallback_lines")]
    pub fallback_lines: usize,
    #[serde(default = "default_citation_label")]
    pub citation_label: String,
    #[serde(default = "default_clarification")]
    pub clarification: String,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            max_lines_per_chunk: default_max_lines(),
            fallback_lines: default_fallback_lines(),
            citation_label: default_citation_label(),
            clarification: default_clarification(),
        }
    }
}

fn default_max_lines() -> usize {
    5
}
fn default_fallback_lines() -> usize {
    3
}
fn default_citation_label() -> String {
    "source".to_string()
}
fn default_clarification() -> String {
    CLARIFICATION.to_string()
}

impl Config {
    /// Parameters for the core retrieval engine.
    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            heading_sigil: self.chunking.heading_sigil.clone(),
            search: SearchParams {
                top_k: self.retrieval.top_k,
            },
            answer: AnswerParams {
                max_lines_per_chunk: self.answer.max_lines_per_chunk,
                fallback_lines: self.answer.fallback_lines,
                citation_label: self.answer.citation_label.clone(),
            },
            clarification: self.answer.clarification.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunking.heading_sigil.trim().is_empty() {
            bail!("chunking.heading_sigil must not be empty");
        }
        if self.retrieval.top_k < 1 {
            bail!("retrieval.top_k must be >= 1");
        }
        if self.answer.max_lines_per_chunk < 1 {
            bail!("answer.max_lines_per_chunk must be >= 1");
        }
        if self.answer.clarification.trim().is_empty() {
            bail!("answer.clarification must not be empty");
        }
        if self.corpus.include_globs.is_empty() {
            bail!("corpus.include_globs must list at least one pattern");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Load an explicit config, or fall back to [`DEFAULT_CONFIG_PATH`] when it
/// exists, or to built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
