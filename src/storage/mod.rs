//! Storage layer.
//!
//! - [`SqliteStore`]: the process's conversation log and resource table
//! - [`MemoryStore`]: the same contract in memory
//! - [`DEFAULT_RESOURCES`]: rows seeded into an empty resource table

// Allow significant_drop_tightening - holding the connection guard for the
// whole statement keeps the row reads consistent.
#![allow(clippy::significant_drop_tightening)]

mod memory;
mod seed;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStore;
pub use seed::DEFAULT_RESOURCES;
pub use sqlite::SqliteStore;
pub use traits::{ConversationLog, ResourceStore};
