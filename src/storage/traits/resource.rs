//! Resource table trait.

use crate::Result;
use crate::models::{NewResource, ResourceEntry};

/// Read access to help resources, plus first-run seeding.
pub trait ResourceStore: Send + Sync {
    /// Returns every resource in insertion order.
    fn all_resources(&self) -> Result<Vec<ResourceEntry>>;

    /// Returns resources tagged with `category`.
    fn resources_in(&self, category: &str) -> Result<Vec<ResourceEntry>>;

    /// Returns the number of stored resources.
    fn resource_count(&self) -> Result<usize>;

    /// Inserts `rows` if the table is empty and returns how many were inserted.
    ///
    /// A non-empty table is left untouched and 0 is returned.
    fn seed_resources(&self, rows: &[NewResource]) -> Result<usize>;
}
