//! `SQLite` storage service.
//!
//! One [`SqliteStore`] owns the connection for the whole process and is
//! handed to the chat engine and the resource suggester explicitly.
//!
//! ## Module Structure
//!
//! - `connection`: opening, configuring, and locking the connection
//! - `schema`: table definitions
//! - `store`: the [`SqliteStore`] itself
//! - `metrics`: storage operation metrics

mod connection;
mod metrics;
mod schema;
mod store;

pub use connection::{acquire_lock, configure_connection, open_file, open_in_memory};
pub use metrics::record_operation_metrics;
pub use store::SqliteStore;
