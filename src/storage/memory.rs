//! In-memory store.
//!
//! Same contract as [`SqliteStore`](super::SqliteStore) without a database.
//! Used by tests and by `haven ask --dry-run`.

use super::sqlite::acquire_lock;
use super::traits::{ConversationLog, ResourceStore};
use crate::Result;
use crate::current_timestamp;
use crate::models::{ConversationRecord, NewConversation, NewResource, ResourceEntry};
use std::sync::Mutex;

/// Store backed by vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    conversations: Mutex<Vec<ConversationRecord>>,
    resources: Mutex<Vec<ResourceEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationLog for MemoryStore {
    fn append(&self, turn: &NewConversation) -> Result<i64> {
        let mut conversations = acquire_lock(&self.conversations);
        let id = i64::try_from(conversations.len()).unwrap_or(i64::MAX - 1) + 1;
        conversations.push(ConversationRecord {
            id,
            user_input: turn.user_input.clone(),
            bot_response: turn.bot_response.clone(),
            sentiment_score: turn.sentiment_score,
            timestamp: current_timestamp(),
        });
        Ok(id)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ConversationRecord>> {
        let conversations = acquire_lock(&self.conversations);
        Ok(conversations.iter().rev().take(limit).cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(acquire_lock(&self.conversations).len())
    }
}

impl ResourceStore for MemoryStore {
    fn all_resources(&self) -> Result<Vec<ResourceEntry>> {
        Ok(acquire_lock(&self.resources).clone())
    }

    fn resources_in(&self, category: &str) -> Result<Vec<ResourceEntry>> {
        Ok(acquire_lock(&self.resources)
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect())
    }

    fn resource_count(&self) -> Result<usize> {
        Ok(acquire_lock(&self.resources).len())
    }

    fn seed_resources(&self, rows: &[NewResource]) -> Result<usize> {
        let mut resources = acquire_lock(&self.resources);
        if !resources.is_empty() {
            return Ok(0);
        }
        resources.extend(rows.iter().zip(1..).map(|(row, id)| ResourceEntry {
            id,
            title: row.title.to_string(),
            description: row.description.to_string(),
            url: row.url.to_string(),
            category: row.category.to_string(),
        }));
        Ok(rows.len())
    }
}
