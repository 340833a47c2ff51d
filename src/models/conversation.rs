//! Conversation log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation turn that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    /// Raw user input as submitted.
    pub user_input: String,
    /// Final reply shown to the user.
    pub bot_response: String,
    /// Keyword sentiment score of the input.
    pub sentiment_score: i64,
}

impl NewConversation {
    /// Creates a new unsaved conversation turn.
    #[must_use]
    pub fn new(
        user_input: impl Into<String>,
        bot_response: impl Into<String>,
        sentiment_score: i64,
    ) -> Self {
        Self {
            user_input: user_input.into(),
            bot_response: bot_response.into(),
            sentiment_score,
        }
    }
}

/// One logged turn.
///
/// Records are append-only: created once per logged turn and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Row id assigned by the store.
    pub id: i64,
    /// Raw user input.
    pub user_input: String,
    /// Reply that was returned.
    pub bot_response: String,
    /// Keyword sentiment score.
    pub sentiment_score: i64,
    /// Creation time as Unix seconds.
    pub timestamp: i64,
}

impl ConversationRecord {
    /// Returns the creation time as a UTC datetime.
    ///
    /// Out-of-range timestamps map to the Unix epoch.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }
}
