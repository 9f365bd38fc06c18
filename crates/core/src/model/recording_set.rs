use std::sync::Arc;
use thiserror::Error;

use crate::model::ids::{Category, RecordingId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordingSetError {
    #[error("category {category} has no recordings")]
    Empty { category: Category },
}

/// Ordered, immutable list of recordings belonging to one category.
///
/// Always holds at least one recording. Cloning is cheap: the identifiers
/// are shared between clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSet {
    category: Category,
    ids: Arc<[RecordingId]>,
}

impl RecordingSet {
    /// Build a set from identifiers in the order they should be visited.
    ///
    /// # Errors
    ///
    /// Returns `RecordingSetError::Empty` if no identifiers are given.
    pub fn new(
        category: Category,
        ids: impl IntoIterator<Item = RecordingId>,
    ) -> Result<Self, RecordingSetError> {
        let ids: Arc<[RecordingId]> = ids.into_iter().collect();
        if ids.is_empty() {
            return Err(RecordingSetError::Empty { category });
        }
        Ok(Self { category, ids })
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RecordingId> {
        self.ids.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RecordingId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordingId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn contains(&self, id: &RecordingId) -> bool {
        self.ids.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(words: &[&str]) -> Vec<RecordingId> {
        words.iter().map(|w| RecordingId::new(*w).unwrap()).collect()
    }

    #[test]
    fn empty_set_is_rejected() {
        let category = Category::new("fruit").unwrap();
        let err = RecordingSet::new(category.clone(), Vec::new()).unwrap_err();
        assert_eq!(err, RecordingSetError::Empty { category });
    }

    #[test]
    fn keeps_given_order() {
        let set = RecordingSet::new(
            Category::new("fruit").unwrap(),
            ids(&["szilva", "alma", "korte"]),
        )
        .unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0).map(RecordingId::as_str), Some("szilva"));
        assert_eq!(set.get(2).map(RecordingId::as_str), Some("korte"));
        assert!(set.get(3).is_none());
        assert!(set.contains(&RecordingId::new("alma").unwrap()));
    }

    #[test]
    fn clones_share_identifiers() {
        let set = RecordingSet::new(Category::new("fruit").unwrap(), ids(&["alma"])).unwrap();
        let clone = set.clone();
        assert!(std::ptr::eq(set.as_slice(), clone.as_slice()));
    }
}
