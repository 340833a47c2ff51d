//! User profile rows.

use serde::{Deserialize, Serialize};

/// A user profile row.
///
/// The table exists in the schema but nothing in the chat flow writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Row id.
    pub user_id: i64,
    /// Display name.
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<i64>,
    /// Free-form gender.
    pub gender: Option<String>,
    /// Last session as Unix seconds.
    pub last_session: Option<i64>,
}
