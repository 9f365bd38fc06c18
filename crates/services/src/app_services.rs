use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use listen_core::model::{AnswerChecker, Category, PracticeSettings};
use listen_core::Clock;
use storage::repository::{RecordingCatalog, Storage};

use crate::error::{AppServicesError, SessionError};
use crate::library::RecordingLibrary;
use crate::listening::ListeningSession;
use crate::typing::TypingSession;

/// Assembles the catalog, the recording library and session factories.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    settings: PracticeSettings,
    catalog: Arc<dyn RecordingCatalog>,
    library: Arc<RecordingLibrary>,
}

impl AppServices {
    /// Build services over a recordings directory.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the directory cannot be opened or holds
    /// no recordings.
    pub async fn from_recordings_dir(
        root: impl Into<PathBuf>,
        clock: Clock,
        settings: PracticeSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::filesystem(root).await?;
        Self::with_storage(storage, clock, settings).await
    }

    /// Build services over any catalog backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Library` if the catalog holds no recordings.
    pub async fn with_storage(
        storage: Storage,
        clock: Clock,
        settings: PracticeSettings,
    ) -> Result<Self, AppServicesError> {
        let library = RecordingLibrary::load(storage.recordings.as_ref(), &settings).await?;
        Ok(Self {
            clock,
            settings,
            catalog: storage.recordings,
            library: Arc::new(library),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    #[must_use]
    pub fn library(&self) -> Arc<RecordingLibrary> {
        Arc::clone(&self.library)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<dyn RecordingCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn checker(&self) -> AnswerChecker {
        AnswerChecker::new(self.settings.checker_settings())
    }

    /// Re-read the catalog and replace the library. Running sessions keep the
    /// lists they started with.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Library` if loading fails; the previous
    /// library stays active.
    pub async fn reload(&mut self) -> Result<(), AppServicesError> {
        let library = RecordingLibrary::load(self.catalog.as_ref(), &self.settings).await?;
        self.library = Arc::new(library);
        info!("recording library reloaded");
        Ok(())
    }

    /// Start a listening session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the category is unknown or none is available.
    pub fn start_listening(
        &self,
        category: Option<&Category>,
    ) -> Result<ListeningSession, SessionError> {
        ListeningSession::start(self.library(), self.catalog(), category)
    }

    /// Start a typing session over the configured typing pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the typing pool has no recordings.
    pub fn start_typing(&self) -> Result<TypingSession, SessionError> {
        TypingSession::start(&self.library, self.catalog(), self.checker(), self.clock)
    }
}
