//! Knowledge-base document types.

use serde::{Deserialize, Serialize};

/// A literal question and its literal answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// The question text matched against user input.
    pub question: String,
    /// The answer returned on a match.
    pub answer: String,
}

impl KnowledgeEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// On-disk shape of the knowledge base: `{"questions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Entries in file order.
    #[serde(default)]
    pub questions: Vec<KnowledgeEntry>,
}
