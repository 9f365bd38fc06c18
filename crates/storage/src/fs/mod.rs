use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use listen_core::model::{Category, RecordingId};
use thiserror::Error;
use tracing::debug;

use crate::repository::{AudioClip, RecordingCatalog, Storage, StorageError};

/// File extension of the recordings on disk.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Catalog over a directory laid out as `<root>/<category>/<id>.mp3`.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    root: PathBuf,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FsInitError {
    #[error("recordings directory {path} does not exist or is not a directory")]
    MissingRoot { path: PathBuf },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FsCatalog {
    /// Open the catalog rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `FsInitError::MissingRoot` if `root` is not a directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, FsInitError> {
        let root = root.into();
        match tokio::fs::metadata(&root).await {
            Ok(meta) if meta.is_dir() => Ok(Self { root }),
            Ok(_) => Err(FsInitError::MissingRoot { path: root }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FsInitError::MissingRoot { path: root })
            }
            Err(err) => Err(err.into()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn category_dir(&self, category: &Category) -> Result<PathBuf, StorageError> {
        let name = category.as_str();
        if !is_plain_component(name) {
            return Err(StorageError::NotFound(format!("category {name}")));
        }
        Ok(self.root.join(name))
    }

    fn recording_path(&self, category: &Category, id: &RecordingId) -> Result<PathBuf, StorageError> {
        let dir = self.category_dir(category)?;
        if !is_plain_component(id.as_str()) {
            return Err(StorageError::NotFound(format!("recording {category}/{id}")));
        }
        Ok(dir.join(format!("{}.{AUDIO_EXTENSION}", id.as_str())))
    }
}

/// Rejects names that would escape their parent directory.
fn is_plain_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

fn map_io(err: std::io::Error, what: impl FnOnce() -> String) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::NotFound(what())
    } else {
        StorageError::Io(err)
    }
}

#[async_trait]
impl RecordingCatalog for FsCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut categories = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 category");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            match Category::new(name.as_str()) {
                Ok(category) if category.as_str() == name && is_plain_component(&name) => {
                    categories.push(category);
                }
                _ => debug!(name = %name, "skipping category with padded or blank name"),
            }
        }
        categories.sort();
        Ok(categories)
    }

    async fn list_recordings(&self, category: &Category) -> Result<Vec<RecordingId>, StorageError> {
        let dir = self.category_dir(category)?;
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| map_io(e, || format!("category {category}")))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_audio = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == AUDIO_EXTENSION);
            if !is_audio || !entry.file_type().await?.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                debug!(path = %path.display(), "skipping non UTF-8 recording");
                continue;
            };
            match RecordingId::new(stem) {
                Ok(id) if is_plain_component(id.as_str()) => ids.push(id),
                _ => debug!(path = %path.display(), "skipping unplayable recording name"),
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn resolve_audio(
        &self,
        category: &Category,
        id: &RecordingId,
    ) -> Result<AudioClip, StorageError> {
        let path = self.recording_path(category, id)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| map_io(e, || format!("recording {category}/{id}")))?;
        debug!(path = %path.display(), bytes = bytes.len(), "loaded recording");
        Ok(AudioClip::mpeg(category.clone(), id.clone(), bytes))
    }
}

impl Storage {
    /// Build a `Storage` backed by a recordings directory.
    ///
    /// # Errors
    ///
    /// Returns `FsInitError` if the directory cannot be opened.
    pub async fn filesystem(root: impl Into<PathBuf>) -> Result<Self, FsInitError> {
        let catalog = FsCatalog::open(root).await?;
        let recordings: Arc<dyn RecordingCatalog> = Arc::new(catalog);
        Ok(Self { recordings })
    }
}
