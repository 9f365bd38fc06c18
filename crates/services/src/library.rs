use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use listen_core::model::{Category, PracticeSettings, RecordingId, RecordingSet};
use storage::repository::RecordingCatalog;

use crate::error::LibraryError;

/// Recording lists for every category, fixed at load time.
///
/// Built once at startup (shuffling each list when enabled) and read-only
/// afterwards. Rebuild it with `RecordingLibrary::load` to pick up changes.
#[derive(Debug, Clone)]
pub struct RecordingLibrary {
    sets: BTreeMap<Category, RecordingSet>,
    typing_category: Category,
}

impl RecordingLibrary {
    /// Load every non-empty category from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NoRecordings` if no category has recordings, or
    /// storage errors from the catalog.
    pub async fn load(
        catalog: &dyn RecordingCatalog,
        settings: &PracticeSettings,
    ) -> Result<Self, LibraryError> {
        let mut lists = Vec::new();
        for category in catalog.list_categories().await? {
            let ids = catalog.list_recordings(&category).await?;
            if ids.is_empty() {
                warn!(category = %category, "skipping category without recordings");
                continue;
            }
            debug!(category = %category, recordings = ids.len(), "loaded category");
            lists.push((category, ids));
        }

        if settings.shuffle() {
            match settings.shuffle_seed() {
                Some(seed) => shuffle_lists(&mut lists, &mut StdRng::seed_from_u64(seed)),
                None => shuffle_lists(&mut lists, &mut rand::rng()),
            }
        }

        let library = Self::from_lists(lists, settings.typing_category().clone())?;
        info!(
            categories = library.sets.len(),
            typing_available = library.has_typing_set(),
            "recording library ready"
        );
        Ok(library)
    }

    /// Build a library from already ordered lists.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NoRecordings` if every list is empty.
    pub fn from_lists(
        lists: impl IntoIterator<Item = (Category, Vec<RecordingId>)>,
        typing_category: Category,
    ) -> Result<Self, LibraryError> {
        let mut sets = BTreeMap::new();
        for (category, ids) in lists {
            if ids.is_empty() {
                continue;
            }
            let set = RecordingSet::new(category.clone(), ids)?;
            sets.insert(category, set);
        }

        if sets.is_empty() {
            return Err(LibraryError::NoRecordings);
        }

        Ok(Self {
            sets,
            typing_category,
        })
    }

    /// All categories with recordings, sorted by name.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sets.keys()
    }

    /// Categories offered in the listening exercise (everything except the
    /// typing pool).
    pub fn listening_categories(&self) -> impl Iterator<Item = &Category> {
        self.sets
            .keys()
            .filter(move |category| **category != self.typing_category)
    }

    #[must_use]
    pub fn default_listening_category(&self) -> Option<&Category> {
        self.listening_categories().next()
    }

    #[must_use]
    pub fn typing_category(&self) -> &Category {
        &self.typing_category
    }

    #[must_use]
    pub fn has_typing_set(&self) -> bool {
        self.sets.contains_key(&self.typing_category)
    }

    /// Recording list of one category.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownCategory` if the category has no recordings.
    pub fn set(&self, category: &Category) -> Result<&RecordingSet, LibraryError> {
        self.sets
            .get(category)
            .ok_or_else(|| LibraryError::UnknownCategory(category.clone()))
    }
}

fn shuffle_lists<R: Rng + ?Sized>(lists: &mut [(Category, Vec<RecordingId>)], rng: &mut R) {
    for (_, ids) in lists.iter_mut() {
        ids.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listen_core::model::PracticeSettingsDraft;
    use storage::repository::InMemoryCatalog;

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn id(name: &str) -> RecordingId {
        RecordingId::new(name).unwrap()
    }

    fn seeded_catalog() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        for word in ["alma", "korte", "szilva", "barack", "meggy", "dinnye"] {
            catalog
                .insert_recording(category("fruit"), id(word), Vec::new())
                .unwrap();
        }
        for word in ["kutya", "macska"] {
            catalog
                .insert_recording(category("animals"), id(word), Vec::new())
                .unwrap();
        }
        for word in ["árvíztűrő", "tükörfúrógép"] {
            catalog
                .insert_recording(category("for_typing"), id(word), Vec::new())
                .unwrap();
        }
        catalog.insert_category(category("empty")).unwrap();
        catalog
    }

    fn settings(shuffle: bool, seed: Option<u64>) -> PracticeSettings {
        PracticeSettingsDraft {
            shuffle,
            shuffle_seed: seed,
            ..PracticeSettingsDraft::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn loads_non_empty_categories() {
        let library = RecordingLibrary::load(&seeded_catalog(), &settings(false, None))
            .await
            .unwrap();

        let categories: Vec<_> = library.categories().cloned().collect();
        assert_eq!(
            categories,
            vec![category("animals"), category("for_typing"), category("fruit")]
        );
        assert!(library.set(&category("empty")).is_err());
    }

    #[tokio::test]
    async fn unshuffled_lists_keep_catalog_order() {
        let library = RecordingLibrary::load(&seeded_catalog(), &settings(false, None))
            .await
            .unwrap();
        let fruit: Vec<_> = library
            .set(&category("fruit"))
            .unwrap()
            .iter()
            .map(RecordingId::as_str)
            .collect();
        assert_eq!(
            fruit,
            vec!["alma", "barack", "dinnye", "korte", "meggy", "szilva"]
        );
    }

    #[tokio::test]
    async fn seeded_shuffle_is_reproducible_permutation() {
        let catalog = seeded_catalog();
        let first = RecordingLibrary::load(&catalog, &settings(true, Some(42)))
            .await
            .unwrap();
        let second = RecordingLibrary::load(&catalog, &settings(true, Some(42)))
            .await
            .unwrap();

        let fruit_a = first.set(&category("fruit")).unwrap();
        let fruit_b = second.set(&category("fruit")).unwrap();
        assert_eq!(fruit_a.as_slice(), fruit_b.as_slice());

        let mut sorted: Vec<_> = fruit_a.iter().cloned().collect();
        sorted.sort();
        let expected = catalog.list_recordings(&category("fruit")).await.unwrap();
        assert_eq!(sorted, expected);
    }

    #[tokio::test]
    async fn typing_pool_is_not_a_listening_category() {
        let library = RecordingLibrary::load(&seeded_catalog(), &settings(false, None))
            .await
            .unwrap();

        let listening: Vec<_> = library.listening_categories().cloned().collect();
        assert_eq!(listening, vec![category("animals"), category("fruit")]);
        assert_eq!(library.default_listening_category(), Some(&category("animals")));
        assert!(library.has_typing_set());
    }

    #[tokio::test]
    async fn empty_catalog_is_an_error() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_category(category("empty")).unwrap();
        let err = RecordingLibrary::load(&catalog, &settings(true, None))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::NoRecordings));
    }
}
