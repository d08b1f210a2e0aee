//! Question answering over the filesystem corpus.
//!
//! [`answer_query`] is the single-call entry point. [`Session`] keeps the
//! interaction history across questions for `docqa chat`; `docqa ask` runs
//! one cycle through [`run_ask`].

use anyhow::{Context, Result};
use docqa_core::models::InteractionRecord;
use docqa_core::{Engine, Outcome};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::connector_fs::FsCorpus;

/// Answer `question` from the Markdown files under `corpus_root`, using
/// default settings.
///
/// Appends to `history` only when an answer (not a clarification) is
/// produced. A missing root fails with [`docqa_core::CorpusError::NotFound`].
pub fn answer_query(
    question: &str,
    corpus_root: &Path,
    history: &mut Vec<InteractionRecord>,
) -> Result<String> {
    let corpus = FsCorpus::new(corpus_root)?;
    let outcome = Engine::default().run(&corpus, question, history)?;
    Ok(outcome.into_text())
}

/// A corpus, an engine, and the history of answered questions.
pub struct Session {
    engine: Engine,
    corpus: FsCorpus,
    history: Vec<InteractionRecord>,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            engine: Engine::new(config.engine_params()),
            corpus: FsCorpus::from_config(&config.corpus)?,
            history: Vec::new(),
        })
    }

    pub fn ask(&mut self, question: &str) -> Result<Outcome> {
        Ok(self.engine.run(&self.corpus, question, &mut self.history)?)
    }

    pub fn history(&self) -> &[InteractionRecord] {
        &self.history
    }
}

/// `--json` shape for `docqa ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse<'a> {
    pub question: &'a str,
    pub outcome: &'a Outcome,
    pub evidence: &'a [docqa_core::models::ScoredChunk],
}

pub fn run_ask(config: &Config, question: &str, json: bool) -> Result<()> {
    let engine = Engine::new(config.engine_params());
    let corpus = FsCorpus::from_config(&config.corpus)?;
    let mut history = Vec::new();

    let retrieval = engine.retrieve(&corpus, question)?;
    let outcome = engine.step(question, &retrieval, &mut history);

    if json {
        let response = AskResponse {
            question,
            outcome: &outcome,
            evidence: retrieval.chunks(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", outcome.text());
    }
    Ok(())
}

const EXIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Interactive loop: one question per line until an exit word or EOF.
/// Blank lines run a cycle like any other question and get the
/// clarification.
pub fn run_chat<R: BufRead, W: Write>(
    config: &Config,
    mut input: R,
    mut output: W,
    transcript: Option<&Path>,
) -> Result<()> {
    let mut session = Session::new(config)?;
    let mut line = String::new();

    loop {
        write!(output, "question (q to quit): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let question = line.trim();
        if EXIT_WORDS.contains(&question.to_lowercase().as_str()) {
            break;
        }
        let outcome = session.ask(question)?;
        writeln!(output, "{}\n", outcome.text())?;
    }

    tracing::debug!(answered = session.history().len(), "chat session ended");

    if let Some(path) = transcript {
        let body = serde_json::to_string_pretty(session.history())?;
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write transcript: {}", path.display()))?;
        writeln!(
            output,
            "Saved {} interaction(s) to {}",
            session.history().len(),
            path.display()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::answer::CLARIFICATION;
    use docqa_core::CorpusError;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn corpus_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.md"),
            "# Intro\ncats are great\n# Outro\ndogs are fine\n",
        )
        .unwrap();
        tmp
    }

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default();
        config.corpus.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_answer_query_cites_chunk() {
        let tmp = corpus_dir();
        let mut history = Vec::new();
        let answer = answer_query("cats", tmp.path(), &mut history).unwrap();
        assert_eq!(answer, "cats are great\nsource: a.md:1");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_answer_query_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = answer_query("cats", &tmp.path().join("gone"), &mut Vec::new()).unwrap_err();
        let corpus_err = err.downcast_ref::<CorpusError>().expect("corpus error");
        assert!(corpus_err.is_not_found());
    }

    #[test]
    fn test_session_accumulates_answers_only() {
        let tmp = corpus_dir();
        let mut session = Session::new(&config_for(tmp.path())).unwrap();

        assert!(!session.ask("dogs").unwrap().is_clarification());
        assert!(session.ask("").unwrap().is_clarification());
        assert!(!session.ask("cats").unwrap().is_clarification());

        let questions: Vec<&str> = session.history().iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["dogs", "cats"]);
    }

    #[test]
    fn test_chat_loop_and_transcript() {
        let tmp = corpus_dir();
        let transcript = tmp.path().join("transcript.json");
        let input = Cursor::new("cats\n\nzebra\nQUIT\ndogs\n");
        let mut output = Vec::new();

        run_chat(&config_for(tmp.path()), input, &mut output, Some(&transcript)).unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("cats are great\nsource: a.md:1"));
        assert!(printed.contains(CLARIFICATION));
        assert!(!printed.contains("dogs are fine"));
        assert!(printed.contains("Saved 1 interaction(s)"));

        let saved: Vec<InteractionRecord> =
            serde_json::from_str(&fs::read_to_string(&transcript).unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].question, "cats");
    }

    #[test]
    fn test_chat_blank_line_gets_clarification() {
        let tmp = corpus_dir();
        let mut output = Vec::new();
        run_chat(&config_for(tmp.path()), Cursor::new("\n   \ncats\n"), &mut output, None)
            .unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches(CLARIFICATION).count(), 2);
        assert!(printed.contains("cats are great\nsource: a.md:1"));
        assert_eq!(printed.matches("question (q to quit): ").count(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_answer_query_reads_symlinked_note() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("shared")).unwrap();
        fs::write(tmp.path().join("shared/real.txt"), "# T\ncats\n").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("shared/real.txt"), tmp.path().join("link.md"))
            .unwrap();

        let answer = answer_query("cats", tmp.path(), &mut Vec::new()).unwrap();
        assert_eq!(answer, "cats\nsource: link.md:1");
    }

    #[test]
    fn test_chat_ends_on_eof() {
        let tmp = corpus_dir();
        let mut output = Vec::new();
        run_chat(&config_for(tmp.path()), Cursor::new("dogs"), &mut output, None).unwrap();
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("dogs are fine\nsource: a.md:3"));
    }
}
