//! Domain types for listening and typing practice: recording sets, the
//! circular navigator, answer grading and letter hints.

pub mod model;
pub mod time;

pub use model::{
    AnswerAttempt, AnswerChecker, Category, CheckerSettings, Feedback, HintBoard, HintSlot,
    Navigator, PracticeSettings, PracticeSettingsDraft, PracticeTally, RecordingId, RecordingSet,
};
pub use time::Clock;
