mod answer;
mod hints;
mod ids;
mod navigator;
mod recording_set;
mod settings;
mod tally;

pub use answer::{AnswerAttempt, AnswerChecker, CheckerSettings, Feedback};
pub use hints::{HINT_SLOTS, HintBoard, HintSlot};
pub use ids::{Category, IdError, RecordingId};
pub use navigator::Navigator;
pub use recording_set::{RecordingSet, RecordingSetError};
pub use settings::{
    DEFAULT_TYPING_CATEGORY, PracticeSettings, PracticeSettingsDraft, PracticeSettingsError,
};
pub use tally::PracticeTally;
