use std::fmt;
use std::sync::Arc;

use tracing::debug;

use listen_core::model::{
    AnswerChecker, Category, Feedback, HintBoard, Navigator, PracticeTally, RecordingId,
};
use listen_core::Clock;
use storage::repository::{AudioClip, RecordingCatalog};

use crate::error::SessionError;
use crate::library::RecordingLibrary;

/// Typing exercise: listen to a word, type it, optionally uncover letters.
///
/// Every time a new word is shown the typed text, the last feedback and the
/// hint tiles are reset.
pub struct TypingSession {
    catalog: Arc<dyn RecordingCatalog>,
    navigator: Navigator,
    checker: AnswerChecker,
    hints: HintBoard,
    typed: String,
    feedback: Option<Feedback>,
    tally: PracticeTally,
    clock: Clock,
}

impl TypingSession {
    /// Start on the first word of the library's typing pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Library` if the typing pool has no recordings.
    pub fn start(
        library: &RecordingLibrary,
        catalog: Arc<dyn RecordingCatalog>,
        checker: AnswerChecker,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let set = library.set(library.typing_category())?.clone();
        let navigator = Navigator::new(set);
        let hints = HintBoard::for_word(navigator.current().as_str());
        debug!(
            category = %library.typing_category(),
            words = navigator.len(),
            diacritic_insensitive = checker.settings().diacritic_insensitive,
            "typing session started"
        );

        Ok(Self {
            catalog,
            navigator,
            checker,
            hints,
            typed: String::new(),
            feedback: None,
            tally: PracticeTally::new(clock.now()),
            clock,
        })
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        self.navigator.set().category()
    }

    /// The word being practised; also the expected answer.
    #[must_use]
    pub fn current_word(&self) -> &RecordingId {
        self.navigator.current()
    }

    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.navigator.position() + 1, self.navigator.len())
    }

    pub fn next(&mut self) -> &RecordingId {
        self.navigator.forward();
        self.show_current();
        self.navigator.current()
    }

    pub fn previous(&mut self) -> &RecordingId {
        self.navigator.backward();
        self.show_current();
        self.navigator.current()
    }

    fn show_current(&mut self) {
        self.hints.show_word(self.navigator.current().as_str());
        self.typed.clear();
        self.feedback = None;
    }

    /// Text of the last submission for the current word.
    #[must_use]
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Feedback for the last submission, `None` until something is submitted.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Grade an answer for the current word.
    pub fn submit(&mut self, typed: Option<&str>) -> Feedback {
        let feedback = self.checker.check(typed, self.navigator.current().as_str());
        self.typed = typed.unwrap_or_default().to_owned();
        self.feedback = Some(feedback);
        self.tally.record(feedback, self.clock.now());
        debug!(word = %self.navigator.current(), ?feedback, "answer graded");
        feedback
    }

    /// Uncover a hint tile; `None` if the tile has no letter for this word.
    pub fn reveal_hint(&mut self, slot: usize) -> Option<char> {
        self.hints.activate(slot)
    }

    #[must_use]
    pub fn hints(&self) -> &HintBoard {
        &self.hints
    }

    #[must_use]
    pub fn tally(&self) -> &PracticeTally {
        &self.tally
    }

    /// Fetch the audio of the current word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Audio` if the catalog cannot deliver the clip.
    pub async fn current_clip(&self) -> Result<AudioClip, SessionError> {
        let clip = self
            .catalog
            .resolve_audio(self.category(), self.current_word())
            .await?;
        Ok(clip)
    }
}

impl fmt::Debug for TypingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingSession")
            .field("category", self.category())
            .field("position", &self.navigator.position())
            .field("len", &self.navigator.len())
            .field("feedback", &self.feedback)
            .field("tally", &self.tally)
            .finish_non_exhaustive()
    }
}
