//! Resource suggestions.

use crate::models::ResourceEntry;
use crate::storage::ResourceStore;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::Arc;

/// Picks a random help resource, optionally from one category.
///
/// The unfiltered set is read once at construction; category queries go to
/// the store each time.
pub struct ResourceSuggester {
    store: Arc<dyn ResourceStore>,
    preloaded: Vec<ResourceEntry>,
}

impl ResourceSuggester {
    /// Creates a suggester, preloading every resource.
    ///
    /// A failed preload is logged and leaves the unfiltered set empty.
    #[must_use]
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        let preloaded = store.all_resources().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not preload resources");
            Vec::new()
        });
        Self { store, preloaded }
    }

    /// Returns the preloaded resources.
    #[must_use]
    pub fn preloaded(&self) -> &[ResourceEntry] {
        &self.preloaded
    }

    /// Picks one resource at random.
    ///
    /// With `category`, candidates are read live from the store. Returns
    /// `None` when there are no candidates or the read fails.
    pub fn suggest<R: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        rng: &mut R,
    ) -> Option<ResourceEntry> {
        match category {
            Some(category) => match self.store.resources_in(category) {
                Ok(candidates) => candidates.choose(rng).cloned(),
                Err(e) => {
                    tracing::warn!(category, error = %e, "resource lookup failed");
                    None
                },
            },
            None => self.preloaded.choose(rng).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DEFAULT_RESOURCES, MemoryStore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.seed_resources(DEFAULT_RESOURCES).unwrap();
        store
    }

    #[test]
    fn test_suggest_from_category() {
        let suggester = ResourceSuggester::new(seeded());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let pick = suggester.suggest(Some("crisis"), &mut rng).unwrap();
            assert_eq!(pick.category, "crisis");
        }
    }

    #[test]
    fn test_suggest_unknown_category_is_none() {
        let suggester = ResourceSuggester::new(seeded());
        let mut rng = StdRng::seed_from_u64(3);
        assert!(suggester.suggest(Some("astrology"), &mut rng).is_none());
    }

    #[test]
    fn test_suggest_uses_preloaded_set() {
        let suggester = ResourceSuggester::new(seeded());
        assert_eq!(suggester.preloaded().len(), DEFAULT_RESOURCES.len());
        let pick = suggester
            .suggest(None, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert!(DEFAULT_RESOURCES.iter().any(|r| r.title == pick.title));
    }

    #[test]
    fn test_suggest_from_empty_store_is_none() {
        let suggester = ResourceSuggester::new(Arc::new(MemoryStore::new()));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(suggester.suggest(None, &mut rng).is_none());
        assert!(suggester.suggest(Some("crisis"), &mut rng).is_none());
    }

    #[test]
    fn test_preload_is_a_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let suggester = ResourceSuggester::new(Arc::clone(&store) as Arc<dyn ResourceStore>);
        store.seed_resources(DEFAULT_RESOURCES).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        assert!(suggester.suggest(None, &mut rng).is_none());
        assert!(suggester.suggest(Some("anger"), &mut rng).is_some());
    }
}
