use chrono::{DateTime, Utc};

use crate::model::answer::Feedback;

/// Running count of graded answers in a typing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeTally {
    started_at: DateTime<Utc>,
    last_answer_at: Option<DateTime<Utc>>,
    empty: u32,
    correct: u32,
    incorrect: u32,
}

impl PracticeTally {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            last_answer_at: None,
            empty: 0,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Count one graded submission.
    ///
    /// Timestamps earlier than the session start are clamped to it.
    pub fn record(&mut self, feedback: Feedback, answered_at: DateTime<Utc>) {
        match feedback {
            Feedback::Empty => self.empty = self.empty.saturating_add(1),
            Feedback::Correct => self.correct = self.correct.saturating_add(1),
            Feedback::Incorrect => self.incorrect = self.incorrect.saturating_add(1),
        }
        self.last_answer_at = Some(answered_at.max(self.started_at));
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn last_answer_at(&self) -> Option<DateTime<Utc>> {
        self.last_answer_at
    }

    #[must_use]
    pub fn empty(&self) -> u32 {
        self.empty
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    /// Graded answers, not counting blank submissions.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Share of graded answers that were correct, if any were graded.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        let attempts = self.attempts();
        if attempts == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(attempts))
        }
    }
}
