//! Export sink trait and the exported record shape.

use crate::Result;
use crate::models::ConversationRecord;
use serde::Serialize;

/// One conversation turn as written by every export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportableConversation {
    /// Row id.
    pub id: i64,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// Sentiment score of the user input.
    pub sentiment_score: i64,
    /// What the user typed.
    pub user_input: String,
    /// What the bot replied.
    pub bot_response: String,
}

impl From<&ConversationRecord> for ExportableConversation {
    fn from(record: &ConversationRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at().to_rfc3339(),
            sentiment_score: record.sentiment_score,
            user_input: record.user_input.clone(),
            bot_response: record.bot_response.clone(),
        }
    }
}

/// Destination for exported conversation records.
pub trait ExportSink {
    /// Writes a single record to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or I/O fails.
    fn write(&mut self, record: &ExportableConversation) -> Result<()>;

    /// Finalizes the export, writing any footers and flushing buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}
