use std::fmt;
use std::sync::Arc;

use tracing::debug;

use listen_core::model::{Category, Navigator, RecordingId};
use storage::repository::{AudioClip, RecordingCatalog};

use crate::error::SessionError;
use crate::library::RecordingLibrary;

/// Listening exercise: page through the recordings of one category.
///
/// The session owns its navigator and applies one step per event. Selecting
/// another category replaces the navigator, so the cursor starts over.
#[derive(Clone)]
pub struct ListeningSession {
    library: Arc<RecordingLibrary>,
    catalog: Arc<dyn RecordingCatalog>,
    navigator: Navigator,
}

impl ListeningSession {
    /// Start on `category`, or on the library's default listening category.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoListeningCategory` if the library only holds
    /// the typing pool, or `SessionError::Library` for unknown categories.
    pub fn start(
        library: Arc<RecordingLibrary>,
        catalog: Arc<dyn RecordingCatalog>,
        category: Option<&Category>,
    ) -> Result<Self, SessionError> {
        let category = match category {
            Some(category) => category.clone(),
            None => library
                .default_listening_category()
                .cloned()
                .ok_or(SessionError::NoListeningCategory)?,
        };
        let navigator = Navigator::new(library.set(&category)?.clone());
        debug!(category = %category, recordings = navigator.len(), "listening session started");

        Ok(Self {
            library,
            catalog,
            navigator,
        })
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        self.navigator.set().category()
    }

    #[must_use]
    pub fn current(&self) -> &RecordingId {
        self.navigator.current()
    }

    /// One-based position and total, for "3 / 12" style display.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.navigator.position() + 1, self.navigator.len())
    }

    /// Switch category, starting again at its first recording.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Library` if the category is unknown; the current
    /// category is kept in that case.
    pub fn select_category(&mut self, category: &Category) -> Result<&RecordingId, SessionError> {
        let set = self.library.set(category)?.clone();
        self.navigator = Navigator::new(set);
        debug!(category = %category, "listening category selected");
        Ok(self.navigator.current())
    }

    pub fn next(&mut self) -> &RecordingId {
        self.navigator.step_next()
    }

    pub fn previous(&mut self) -> &RecordingId {
        self.navigator.step_prev()
    }

    /// Rebuild the cursor from cumulative click counts since the category was
    /// selected. Missing counts mean no clicks.
    pub fn replay(
        &mut self,
        forward_clicks: Option<u32>,
        backward_clicks: Option<u32>,
    ) -> &RecordingId {
        self.navigator = Navigator::replayed(
            self.navigator.set().clone(),
            forward_clicks.unwrap_or_default(),
            backward_clicks.unwrap_or_default(),
        );
        self.navigator.current()
    }

    /// Fetch the audio of the current recording.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Audio` if the catalog cannot deliver the clip.
    pub async fn current_clip(&self) -> Result<AudioClip, SessionError> {
        let clip = self
            .catalog
            .resolve_audio(self.category(), self.current())
            .await?;
        Ok(clip)
    }
}

impl fmt::Debug for ListeningSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListeningSession")
            .field("category", self.category())
            .field("position", &self.navigator.position())
            .field("len", &self.navigator.len())
            .finish_non_exhaustive()
    }
}
