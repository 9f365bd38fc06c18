use async_trait::async_trait;
use listen_core::model::{Category, RecordingId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// MIME type of every recording served by the catalogs.
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Errors surfaced by catalog adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Playable audio for one recording.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub category: Category,
    pub id: RecordingId,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl AudioClip {
    #[must_use]
    pub fn mpeg(category: Category, id: RecordingId, bytes: Vec<u8>) -> Self {
        Self {
            category,
            id,
            mime: AUDIO_MIME,
            bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("category", &self.category)
            .field("id", &self.id)
            .field("mime", &self.mime)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Source of recordings grouped by category.
#[async_trait]
pub trait RecordingCatalog: Send + Sync {
    /// List every category, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// List the recordings of one category, sorted by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the category does not exist.
    async fn list_recordings(&self, category: &Category) -> Result<Vec<RecordingId>, StorageError>;

    /// Fetch the audio for a recording.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the recording is missing, or other
    /// storage errors.
    async fn resolve_audio(
        &self,
        category: &Category,
        id: &RecordingId,
    ) -> Result<AudioClip, StorageError>;
}

type CategoryMap = BTreeMap<Category, BTreeMap<RecordingId, Vec<u8>>>;

/// Simple in-memory catalog for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    recordings: Arc<Mutex<CategoryMap>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a recording, creating its category on first use.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_recording(
        &self,
        category: Category,
        id: RecordingId,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .recordings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entry(category).or_default().insert(id, bytes.into());
        Ok(())
    }

    /// Register a category without recordings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_category(&self, category: Category) -> Result<(), StorageError> {
        let mut guard = self
            .recordings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entry(category).or_default();
        Ok(())
    }
}

#[async_trait]
impl RecordingCatalog for InMemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .recordings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.keys().cloned().collect())
    }

    async fn list_recordings(&self, category: &Category) -> Result<Vec<RecordingId>, StorageError> {
        let guard = self
            .recordings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(category)
            .map(|recordings| recordings.keys().cloned().collect())
            .ok_or_else(|| StorageError::NotFound(format!("category {category}")))
    }

    async fn resolve_audio(
        &self,
        category: &Category,
        id: &RecordingId,
    ) -> Result<AudioClip, StorageError> {
        let guard = self
            .recordings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let bytes = guard
            .get(category)
            .and_then(|recordings| recordings.get(id))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("recording {category}/{id}")))?;
        Ok(AudioClip::mpeg(category.clone(), id.clone(), bytes))
    }
}

/// Holds the catalog behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub recordings: Arc<dyn RecordingCatalog>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(catalog: InMemoryCatalog) -> Self {
        let recordings: Arc<dyn RecordingCatalog> = Arc::new(catalog);
        Self { recordings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn id(name: &str) -> RecordingId {
        RecordingId::new(name).unwrap()
    }

    #[tokio::test]
    async fn lists_categories_and_recordings_sorted() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert_recording(category("fruit"), id("szilva"), b"s".to_vec())
            .unwrap();
        catalog
            .insert_recording(category("fruit"), id("alma"), b"a".to_vec())
            .unwrap();
        catalog
            .insert_recording(category("animals"), id("kutya"), b"k".to_vec())
            .unwrap();
        catalog.insert_category(category("empty")).unwrap();

        let categories = catalog.list_categories().await.unwrap();
        assert_eq!(
            categories,
            vec![category("animals"), category("empty"), category("fruit")]
        );

        let fruit = catalog.list_recordings(&category("fruit")).await.unwrap();
        assert_eq!(fruit, vec![id("alma"), id("szilva")]);
        assert!(
            catalog
                .list_recordings(&category("empty"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn resolves_audio_bytes() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert_recording(category("animals"), id("kutya"), b"woof".to_vec())
            .unwrap();

        let clip = catalog
            .resolve_audio(&category("animals"), &id("kutya"))
            .await
            .unwrap();
        assert_eq!(clip.bytes, b"woof");
        assert_eq!(clip.mime, AUDIO_MIME);
        assert_eq!(clip.id, id("kutya"));
    }

    #[tokio::test]
    async fn missing_entries_are_not_found() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert_recording(category("animals"), id("kutya"), Vec::new())
            .unwrap();

        let err = catalog
            .resolve_audio(&category("animals"), &id("macska"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        let err = catalog
            .list_recordings(&category("plants"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Storage>();
    }
}
