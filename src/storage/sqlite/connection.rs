//! Connection handling for the `SQLite` store.
//!
//! Opening, configuring, and locking the single connection the store owns.

use crate::{Error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Acquires the connection lock, recovering from poison.
///
/// If a previous holder panicked, the connection is still usable: every
/// write is a single statement or a committed transaction. The poison is
/// logged and counted instead of cascading the panic.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Opens a database file, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the directory cannot be created or
/// the file cannot be opened.
pub fn open_file(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
            operation: "create_data_dir".to_string(),
            cause: format!("{}: {e}", parent.display()),
        })?;
    }

    Connection::open(path).map_err(|e| Error::OperationFailed {
        operation: "open_sqlite".to_string(),
        cause: format!("{}: {e}", path.display()),
    })
}

/// Opens a private in-memory database.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if `SQLite` cannot allocate it.
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| Error::op("open_sqlite_in_memory", e))
}

/// Configures a connection for a single-writer desktop workload.
///
/// - **WAL mode**: readers never block the turn writer
/// - **NORMAL synchronous**: durable at checkpoint, fast per insert
/// - **`busy_timeout`**: waits up to 5 seconds on a locked file
///
/// Pragma results are ignored: `journal_mode` is not supported for in-memory
/// databases and reports the mode it kept.
pub fn configure_connection(conn: &Connection) {
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
}
