//! Help resources.

use serde::{Deserialize, Serialize};

/// A stored help resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Row id.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Where to find it.
    pub url: String,
    /// Category tag, e.g. `crisis` or `therapy`.
    pub category: String,
}

impl ResourceEntry {
    /// Formats the entry as a chat follow-up message.
    #[must_use]
    pub fn suggestion_text(&self) -> String {
        format!("Here's a resource that might help: {}\n{}", self.title, self.url)
    }
}

/// A resource row to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewResource {
    /// Short title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Where to find it.
    pub url: &'static str,
    /// Category tag.
    pub category: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_text() {
        let entry = ResourceEntry {
            id: 3,
            title: "7 Cups".to_string(),
            description: "Free online therapy and counseling".to_string(),
            url: "https://www.7cups.com".to_string(),
            category: "therapy".to_string(),
        };
        assert_eq!(
            entry.suggestion_text(),
            "Here's a resource that might help: 7 Cups\nhttps://www.7cups.com"
        );
    }
}
