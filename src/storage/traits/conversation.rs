//! Conversation log trait.

use crate::Result;
use crate::models::{ConversationRecord, NewConversation};

/// Append-only log of chat turns.
pub trait ConversationLog: Send + Sync {
    /// Appends a turn and returns its row id.
    fn append(&self, turn: &NewConversation) -> Result<i64>;

    /// Returns up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<ConversationRecord>>;

    /// Returns the total number of records.
    fn count(&self) -> Result<usize>;
}
