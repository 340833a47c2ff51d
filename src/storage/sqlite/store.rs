//! The `SQLite` store.

use super::connection::{acquire_lock, configure_connection, open_file, open_in_memory};
use super::metrics::record_operation_metrics;
use super::schema::SCHEMA;
use crate::models::{ConversationRecord, NewConversation, NewResource, ResourceEntry, UserProfile};
use crate::storage::traits::{ConversationLog, ResourceStore};
use crate::{Error, Result, current_timestamp};
use rusqlite::{Connection, Row, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::instrument;

/// Storage service owning the process's single `SQLite` connection.
///
/// # Concurrency Model
///
/// `rusqlite::Connection` is not `Sync`, so it lives behind a `Mutex`. The
/// chat flow has one writer (the turn worker) and occasional readers, and
/// every write is one statement or one transaction, so a poisoned lock is
/// recovered rather than propagated.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `db_path` and ensures the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = open_file(&db_path)?;
        Self::with_connection(conn, Some(db_path))
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(open_in_memory()?, None)
    }

    fn with_connection(conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        configure_connection(&conn);
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::op("create_schema", e))?;
        tracing::debug!(path = ?db_path, "sqlite store ready");
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Returns all user profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn user_profiles(&self) -> Result<Vec<UserProfile>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT user_id, name, age, gender, last_session
                 FROM user_profiles ORDER BY user_id",
            )
            .map_err(|e| Error::op("list_user_profiles", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(UserProfile {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    age: row.get(2)?,
                    gender: row.get(3)?,
                    last_session: row.get(4)?,
                })
            })
            .map_err(|e| Error::op("list_user_profiles", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::op("list_user_profiles", e))
    }

    fn query_resources(
        &self,
        operation: &'static str,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<ResourceEntry>> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(params, resource_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })();
        record_operation_metrics(operation, start, result.is_ok());
        result.map_err(|e| Error::op(operation, e))
    }

    fn count_rows(&self, operation: &'static str, sql: &str) -> Result<usize> {
        let conn = acquire_lock(&self.conn);
        let count: i64 = conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(|e| Error::op(operation, e))?;
        usize::try_from(count).map_err(|e| Error::op(operation, e))
    }
}

impl ConversationLog for SqliteStore {
    #[instrument(skip(self, turn), fields(sentiment = turn.sentiment_score))]
    fn append(&self, turn: &NewConversation) -> Result<i64> {
        let start = Instant::now();
        let result = {
            let conn = acquire_lock(&self.conn);
            conn.execute(
                "INSERT INTO conversations (user_input, bot_response, sentiment_score, timestamp)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    turn.user_input,
                    turn.bot_response,
                    turn.sentiment_score,
                    current_timestamp()
                ],
            )
            .map(|_| conn.last_insert_rowid())
        };
        record_operation_metrics("append_conversation", start, result.is_ok());
        result.map_err(|e| Error::op("append_conversation", e))
    }

    fn recent(&self, limit: usize) -> Result<Vec<ConversationRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT id, user_input, bot_response, sentiment_score, timestamp
                 FROM conversations ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| Error::op("recent_conversations", e))?;
        let rows = stmt
            .query_map(params![limit], conversation_from_row)
            .map_err(|e| Error::op("recent_conversations", e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::op("recent_conversations", e))
    }

    fn count(&self) -> Result<usize> {
        self.count_rows("count_conversations", "SELECT COUNT(*) FROM conversations")
    }
}

impl ResourceStore for SqliteStore {
    fn all_resources(&self) -> Result<Vec<ResourceEntry>> {
        self.query_resources(
            "all_resources",
            "SELECT id, title, description, url, category FROM resources ORDER BY id",
            [],
        )
    }

    fn resources_in(&self, category: &str) -> Result<Vec<ResourceEntry>> {
        self.query_resources(
            "resources_in_category",
            "SELECT id, title, description, url, category FROM resources
             WHERE category = ?1 ORDER BY id",
            params![category],
        )
    }

    fn resource_count(&self) -> Result<usize> {
        self.count_rows("count_resources", "SELECT COUNT(*) FROM resources")
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn seed_resources(&self, rows: &[NewResource]) -> Result<usize> {
        let start = Instant::now();
        let result = {
            let mut conn = acquire_lock(&self.conn);
            seed_in_transaction(&mut conn, rows)
        };
        record_operation_metrics("seed_resources", start, result.is_ok());
        let inserted = result.map_err(|e| Error::op("seed_resources", e))?;
        if inserted == 0 {
            tracing::info!("resources already exist in database");
        } else {
            tracing::info!(inserted, "resources database initialized");
        }
        Ok(inserted)
    }
}

/// Counts and inserts inside one transaction so two seeders cannot both insert.
fn seed_in_transaction(conn: &mut Connection, rows: &[NewResource]) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;
    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM resources", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }
    {
        let mut stmt = tx.prepare(
            "INSERT INTO resources (title, description, url, category) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for row in rows {
            stmt.execute(params![row.title, row.description, row.url, row.category])?;
        }
    }
    tx.commit()?;
    Ok(rows.len())
}

fn resource_from_row(row: &Row<'_>) -> rusqlite::Result<ResourceEntry> {
    Ok(ResourceEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        url: row.get(3)?,
        category: row.get(4)?,
    })
}

fn conversation_from_row(row: &Row<'_>) -> rusqlite::Result<ConversationRecord> {
    Ok(ConversationRecord {
        id: row.get(0)?,
        user_input: row.get(1)?,
        bot_response: row.get(2)?,
        sentiment_score: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DEFAULT_RESOURCES;

    #[test]
    fn test_append_and_recent() {
        let store = SqliteStore::in_memory().unwrap();
        let first = store
            .append(&NewConversation::new("hello", "hi there", 0))
            .unwrap();
        let second = store
            .append(&NewConversation::new("I feel good", "glad", 1))
            .unwrap();
        assert!(second > first);

        let recent = store.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].user_input, "I feel good");
        assert_eq!(recent[0].sentiment_score, 1);
        assert_eq!(recent[1].bot_response, "hi there");
        assert!(recent[0].timestamp > 0);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_recent_respects_limit() {
        let store = SqliteStore::in_memory().unwrap();
        for i in 0..5 {
            store
                .append(&NewConversation::new(format!("msg {i}"), "ok", 0))
                .unwrap();
        }
        let recent = store.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].user_input, "msg 4");
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.seed_resources(DEFAULT_RESOURCES).unwrap(), DEFAULT_RESOURCES.len());
        assert_eq!(store.seed_resources(DEFAULT_RESOURCES).unwrap(), 0);
        assert_eq!(store.resource_count().unwrap(), DEFAULT_RESOURCES.len());
    }

    #[test]
    fn test_resources_in_category() {
        let store = SqliteStore::in_memory().unwrap();
        store.seed_resources(DEFAULT_RESOURCES).unwrap();

        let lgbtq = store.resources_in("lgbtq").unwrap();
        assert_eq!(lgbtq.len(), 2);
        assert!(lgbtq.iter().all(|r| r.category == "lgbtq"));

        assert!(store.resources_in("no-such-category").unwrap().is_empty());
    }

    #[test]
    fn test_all_resources_in_insertion_order() {
        let store = SqliteStore::in_memory().unwrap();
        store.seed_resources(DEFAULT_RESOURCES).unwrap();
        let all = store.all_resources().unwrap();
        assert_eq!(all.len(), DEFAULT_RESOURCES.len());
        assert_eq!(all[0].title, DEFAULT_RESOURCES[0].title);
    }

    #[test]
    fn test_user_profiles_empty() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.user_profiles().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haven.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.seed_resources(DEFAULT_RESOURCES).unwrap();
            store.append(&NewConversation::new("a", "b", 0)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.db_path(), Some(path.as_path()));
        assert_eq!(store.seed_resources(DEFAULT_RESOURCES).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 1);
    }
}
