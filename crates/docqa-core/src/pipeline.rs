//! The retrieval state machine.
//!
//! One query cycle runs two states:
//!
//! ```text
//!              ┌──────────┐  Matched(chunks)  ┌──────────┐
//!  question ──▶│ retrieve │──────────────────▶│  answer  │──▶ history += record
//!              └────┬─────┘                   └──────────┘
//!                   │ Unmatched               ┌──────────┐
//!                   └────────────────────────▶│ clarify  │
//!                                             └──────────┘
//! ```
//!
//! `retrieve` scans the corpus, chunks every document, and ranks the
//! chunks against the question. Both branches are terminal; nothing loops
//! back to `retrieve`. Only `answer` touches the session history, and only
//! by appending.

use serde::Serialize;

use crate::answer::{synthesize, AnswerParams, CLARIFICATION};
use crate::chunk::{chunk_document, DEFAULT_HEADING_SIGIL};
use crate::corpus::{Corpus, CorpusError};
use crate::models::{Chunk, InteractionRecord, ScoredChunk};
use crate::search::{rank, SearchParams};
use crate::tokenize::tokenize;

/// Everything the engine needs besides the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineParams {
    pub heading_sigil: String,
    pub search: SearchParams,
    pub answer: AnswerParams,
    pub clarification: String,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            heading_sigil: DEFAULT_HEADING_SIGIL.to_string(),
            search: SearchParams::default(),
            answer: AnswerParams::default(),
            clarification: CLARIFICATION.to_string(),
        }
    }
}

/// Result of the `retrieve` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    /// At least one chunk scored above zero. Never empty.
    Matched(Vec<ScoredChunk>),
    Unmatched,
}

impl Retrieval {
    pub fn from_ranked(ranked: Vec<ScoredChunk>) -> Self {
        if ranked.is_empty() {
            Self::Unmatched
        } else {
            Self::Matched(ranked)
        }
    }

    /// Ranked evidence, empty when unmatched.
    pub fn chunks(&self) -> &[ScoredChunk] {
        match self {
            Self::Matched(chunks) => chunks,
            Self::Unmatched => &[],
        }
    }
}

/// Terminal state of a query cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Outcome {
    Answered(String),
    Clarify(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Answered(text) | Self::Clarify(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Answered(text) | Self::Clarify(text) => text,
        }
    }

    pub fn is_clarification(&self) -> bool {
        matches!(self, Self::Clarify(_))
    }
}

/// Runs query cycles with a fixed set of parameters.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    params: EngineParams,
}

impl Engine {
    pub fn new(params: EngineParams) -> Self {
        Self { params }
    }

    /// Read and chunk every document in `corpus`, in corpus order.
    pub fn chunks<C: Corpus>(&self, corpus: &C) -> Result<Vec<Chunk>, CorpusError> {
        let docs = corpus.documents()?;
        Ok(docs
            .iter()
            .flat_map(|doc| chunk_document(doc, &self.params.heading_sigil))
            .collect())
    }

    /// The `retrieve` state: scan, chunk, score, rank.
    pub fn retrieve<C: Corpus>(&self, corpus: &C, question: &str) -> Result<Retrieval, CorpusError> {
        let query_tokens = tokenize(question.trim());
        let chunks = self.chunks(corpus)?;
        let candidates = chunks.len();
        let ranked = rank(&query_tokens, chunks, &self.params.search);

        tracing::debug!(
            query_tokens = query_tokens.len(),
            candidates,
            matched = ranked.len(),
            "retrieve finished"
        );

        Ok(Retrieval::from_ranked(ranked))
    }

    /// The `answer` state. Appends the record to `history`.
    pub fn answer(
        &self,
        question: &str,
        chunks: &[ScoredChunk],
        history: &mut Vec<InteractionRecord>,
    ) -> String {
        let query_tokens = tokenize(question);
        let answer = synthesize(&query_tokens, chunks, &self.params.answer);
        history.push(InteractionRecord::new(question, answer.clone()));
        answer
    }

    /// The `clarify` state. Leaves history alone.
    pub fn clarify(&self) -> String {
        self.params.clarification.clone()
    }

    /// Take the branch selected by `retrieval`.
    pub fn step(
        &self,
        question: &str,
        retrieval: &Retrieval,
        history: &mut Vec<InteractionRecord>,
    ) -> Outcome {
        match retrieval {
            Retrieval::Matched(chunks) => {
                tracing::debug!(chunks = chunks.len(), "branch: answer");
                Outcome::Answered(self.answer(question, chunks, history))
            }
            Retrieval::Unmatched => {
                tracing::debug!("branch: clarify");
                Outcome::Clarify(self.clarify())
            }
        }
    }

    /// Run one full query cycle.
    pub fn run<C: Corpus>(
        &self,
        corpus: &C,
        question: &str,
        history: &mut Vec<InteractionRecord>,
    ) -> Result<Outcome, CorpusError> {
        let retrieval = self.retrieve(corpus, question)?;
        Ok(self.step(question, &retrieval, history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::memory::MemoryCorpus;

    fn intro_outro() -> MemoryCorpus {
        MemoryCorpus::new().with("a.md", "# Intro\ncats are great\n# Outro\ndogs are fine\n")
    }

    #[test]
    fn test_cats_scenario() {
        let engine = Engine::default();
        let mut history = Vec::new();

        let retrieval = engine.retrieve(&intro_outro(), "cats").unwrap();
        assert_eq!(retrieval.chunks().len(), 1);
        assert_eq!(retrieval.chunks()[0].chunk.start_line, 1);

        let outcome = engine.step("cats", &retrieval, &mut history);
        assert_eq!(
            outcome,
            Outcome::Answered("cats are great\nsource: a.md:1".to_string())
        );
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].question, "cats");
        assert_eq!(history[0].answer, outcome.text());
    }

    #[test]
    fn test_empty_question_clarifies() {
        let engine = Engine::default();
        let mut history = Vec::new();
        let outcome = engine.run(&intro_outro(), "", &mut history).unwrap();
        assert_eq!(outcome, Outcome::Clarify(CLARIFICATION.to_string()));
        assert!(history.is_empty());
    }

    #[test]
    fn test_symbol_only_question_clarifies() {
        let engine = Engine::default();
        let mut history = Vec::new();
        let outcome = engine.run(&intro_outro(), "?!?", &mut history).unwrap();
        assert!(outcome.is_clarification());
        assert!(history.is_empty());
    }

    #[test]
    fn test_clarification_leaves_existing_history() {
        let engine = Engine::default();
        let mut history = vec![InteractionRecord::new("earlier", "answer")];
        let before = history.clone();
        engine.run(&intro_outro(), "penguins", &mut history).unwrap();
        assert_eq!(history, before);
    }

    #[test]
    fn test_history_only_appends() {
        let engine = Engine::default();
        let corpus = intro_outro();
        let mut history = vec![InteractionRecord::new("first", "kept")];

        engine.run(&corpus, "cats", &mut history).unwrap();
        engine.run(&corpus, "nothing matches", &mut history).unwrap();
        engine.run(&corpus, "dogs", &mut history).unwrap();

        let questions: Vec<&str> = history.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["first", "cats", "dogs"]);
        assert_eq!(history[0].answer, "kept");
    }

    #[test]
    fn test_disjoint_documents() {
        let corpus = MemoryCorpus::new()
            .with("one.md", "# Fruit\napples and pears\n")
            .with("two.md", "# Tools\nhammers and saws\n");
        let engine = Engine::default();
        let mut history = Vec::new();

        let retrieval = engine.retrieve(&corpus, "saws hammers").unwrap();
        assert!(retrieval
            .chunks()
            .iter()
            .all(|c| c.chunk.source_path == std::path::Path::new("two.md")));

        let outcome = engine.step("saws hammers", &retrieval, &mut history);
        assert!(!outcome.text().contains("one.md"));
        assert!(!outcome.text().contains("apples"));
    }

    #[test]
    fn test_never_more_than_top_k() {
        let mut corpus = MemoryCorpus::new();
        for i in 0..20 {
            corpus.insert(format!("doc{:02}.md", i), "# Topic\nshared keyword\n");
        }
        let engine = Engine::default();
        let retrieval = engine.retrieve(&corpus, "keyword").unwrap();
        assert_eq!(retrieval.chunks().len(), 3);

        let mut history = Vec::new();
        let outcome = engine.step("keyword", &retrieval, &mut history);
        assert_eq!(outcome.text().matches("source: ").count(), 3);
    }

    #[test]
    fn test_custom_clarification() {
        let engine = Engine::new(EngineParams {
            clarification: "未找到相关内容".to_string(),
            ..EngineParams::default()
        });
        let outcome = engine.run(&MemoryCorpus::new(), "anything", &mut Vec::new()).unwrap();
        assert_eq!(outcome.text(), "未找到相关内容");
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(Outcome::Clarify("c".to_string())).unwrap();
        assert_eq!(json["kind"], "clarify");
        assert_eq!(json["text"], "c");
    }
}
