//! Question/answer knowledge base.
//!
//! Loaded once from a JSON or YAML document shaped like
//! `{"questions": [{"question": "...", "answer": "..."}]}`. User input is
//! matched against the questions with [`similarity::closest_match`]; the
//! answer of the first entry with the matched question is returned.

use super::similarity;
use crate::models::{KnowledgeDocument, KnowledgeEntry};
use crate::{Error, Result};
use std::path::Path;

/// Default minimum similarity for a knowledge-base hit.
pub const DEFAULT_MATCH_CUTOFF: f64 = 0.6;

/// On-disk format of a knowledge-base document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` (and anything unrecognised).
    Json,
    /// `.yaml` / `.yml`.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Literal question/answer pairs with fuzzy lookup.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    cutoff: f64,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl KnowledgeBase {
    /// Creates a knowledge base with the default cutoff.
    #[must_use]
    pub const fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries,
            cutoff: DEFAULT_MATCH_CUTOFF,
        }
    }

    /// Sets the minimum similarity for a hit.
    #[must_use]
    pub const fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Returns the minimum similarity for a hit.
    #[must_use]
    pub const fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Loads a knowledge base from `path`.
    ///
    /// A missing file yields an empty knowledge base.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no knowledge base file, starting empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_knowledge_base".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let document: KnowledgeDocument = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => serde_json::from_str(&content)
                .map_err(|e| Error::op("parse_knowledge_base", e))?,
            DocumentFormat::Yaml => serde_yaml_ng::from_str(&content)
                .map_err(|e| Error::op("parse_knowledge_base", e))?,
        };

        tracing::info!(
            path = %path.display(),
            entries = document.questions.len(),
            "knowledge base loaded"
        );
        Ok(Self::new(document.questions))
    }

    /// Loads from `path`, falling back to an empty knowledge base on error.
    ///
    /// Failures are logged as warnings; the chat keeps working without
    /// knowledge-base answers.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "knowledge base unavailable");
            Self::default()
        })
    }

    /// Writes the knowledge base to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let document = KnowledgeDocument {
            questions: self.entries.clone(),
        };
        let content = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => serde_json::to_string_pretty(&document)
                .map_err(|e| Error::op("serialize_knowledge_base", e))?,
            DocumentFormat::Yaml => serde_yaml_ng::to_string(&document)
                .map_err(|e| Error::op("serialize_knowledge_base", e))?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::op("create_knowledge_dir", e))?;
        }
        std::fs::write(path, content).map_err(|e| Error::OperationFailed {
            operation: "write_knowledge_base".to_string(),
            cause: format!("{}: {e}", path.display()),
        })
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the question or answer is blank.
    pub fn add(&mut self, question: &str, answer: &str) -> Result<()> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(Error::InvalidInput(
                "knowledge entries need a question and an answer".to_string(),
            ));
        }
        self.entries.push(KnowledgeEntry::new(question, answer));
        Ok(())
    }

    /// Returns the entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the known question closest to `input`, if close enough.
    #[must_use]
    pub fn closest_question(&self, input: &str) -> Option<&str> {
        similarity::closest_match(
            input,
            self.entries.iter().map(|e| e.question.as_str()),
            self.cutoff,
        )
    }

    /// Returns the answer of the first entry asking exactly `question`.
    #[must_use]
    pub fn answer_for(&self, question: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.question == question)
            .map(|e| e.answer.as_str())
    }

    /// Looks up an answer for raw user input.
    ///
    /// `None` is the normal outcome for most turns. A blank answer counts as
    /// no answer.
    #[must_use]
    pub fn lookup(&self, input: &str) -> Option<&str> {
        self.closest_question(input)
            .and_then(|question| self.answer_for(question))
            .filter(|answer| !answer.trim().is_empty())
    }
}
