//! # docqa Core
//!
//! Shared logic for docqa: data models, tokenizer, heading chunker,
//! lexical ranking, answer synthesis, and the retrieval state machine.
//!
//! This crate performs no filesystem I/O. Documents arrive through the
//! [`corpus::Corpus`] trait; the application crate supplies a filesystem
//! implementation and tests use [`corpus::memory::MemoryCorpus`].

pub mod answer;
pub mod chunk;
pub mod corpus;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod tokenize;

pub use corpus::CorpusError;
pub use pipeline::{Engine, EngineParams, Outcome, Retrieval};
