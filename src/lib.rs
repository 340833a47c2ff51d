//! # Haven
//!
//! A rule-based support chatbot with a local conversation log.
//!
//! Haven answers free text by consulting, in order, a small question/answer
//! knowledge base, an ordered table of regular-expression rules, and a set of
//! generic follow-up prompts. Pattern-path turns are logged to `SQLite`
//! together with a keyword sentiment score.
//!
//! ## Features
//!
//! - Fuzzy knowledge-base lookup (sequence-matching ratio, 0.6 cutoff)
//! - First-match-wins regex rule table with pronoun reflection
//! - Keyword sentiment scoring
//! - Seeded resource table with category-filtered suggestions
//! - Terminal chat shell that computes replies off the interactive loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use haven::services::{KnowledgeBase, ResponseEngine};
//! use haven::storage::SqliteStore;
//!
//! let store = Arc::new(SqliteStore::in_memory()?);
//! let engine = ResponseEngine::new(KnowledgeBase::default(), store);
//! let reply = engine.respond("I am feeling sad today");
//! println!("{}", reply.text);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod rules;
pub mod services;
pub mod shell;
pub mod storage;

// Re-exports for convenience
pub use config::HavenConfig;
pub use models::{ConversationRecord, KnowledgeEntry, ResourceEntry, UserProfile};
pub use rules::{PatternRule, PatternTable};
pub use services::{KnowledgeBase, Reply, ReplySource, ResourceSuggester, ResponseEngine};
pub use storage::{ConversationLog, ResourceStore, SqliteStore};

/// Error type for haven operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty knowledge-base entries, out-of-range config values, unknown formats |
/// | `InvalidPattern` | A rule regex fails to compile or a template references a missing group |
/// | `OperationFailed` | `SQLite`, filesystem, or (de)serialization failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A pattern rule could not be built.
    ///
    /// Raised when:
    /// - The regular expression does not compile
    /// - A response template references a capture group the regex lacks
    /// - A rule has no response templates
    #[error("invalid pattern '{pattern}': {cause}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// Why it was rejected.
        cause: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` database operations fail
    /// - Filesystem I/O errors occur
    /// - Knowledge-base or config documents fail to parse
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Shorthand for [`Error::OperationFailed`].
    pub fn op(operation: &str, cause: impl ToString) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for haven operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
///
/// # Examples
///
/// ```rust
/// use haven::current_timestamp;
///
/// let ts = current_timestamp();
/// assert!(ts > 0);
/// ```
#[must_use]
pub fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::InvalidPattern {
            pattern: "(a".to_string(),
            cause: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "invalid pattern '(a': unclosed group");
    }

    #[test]
    fn test_op_shorthand() {
        let err = Error::op("open_sqlite", "disk full");
        assert_eq!(err.to_string(), "operation 'open_sqlite' failed: disk full");
    }
}
