use deunicode::deunicode;
use serde::{Deserialize, Serialize};

/// Outcome of grading a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    /// Nothing (or only whitespace) was typed.
    Empty,
    Correct,
    Incorrect,
}

impl Feedback {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Learner-facing message shown under the input field.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Empty => "Írj be valamit!",
            Self::Correct => "Helyes megoldás!",
            Self::Incorrect => "Próbáld újra!",
        }
    }
}

/// A single learner submission against the expected transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerAttempt<'a> {
    pub typed: Option<&'a str>,
    pub expected: &'a str,
}

impl<'a> AnswerAttempt<'a> {
    #[must_use]
    pub fn new(typed: Option<&'a str>, expected: &'a str) -> Self {
        Self { typed, expected }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerSettings {
    /// Compare after stripping accents (`á` == `a`).
    pub diacritic_insensitive: bool,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            diacritic_insensitive: true,
        }
    }
}

/// Grades free-text answers, ignoring case and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerChecker {
    settings: CheckerSettings,
}

impl AnswerChecker {
    #[must_use]
    pub fn new(settings: CheckerSettings) -> Self {
        Self { settings }
    }

    /// Plain case-insensitive comparison, accents must match.
    #[must_use]
    pub fn strict() -> Self {
        Self::new(CheckerSettings {
            diacritic_insensitive: false,
        })
    }

    #[must_use]
    pub fn settings(&self) -> CheckerSettings {
        self.settings
    }

    #[must_use]
    pub fn check(&self, typed: Option<&str>, expected: &str) -> Feedback {
        let Some(typed) = typed.filter(|t| !t.trim().is_empty()) else {
            return Feedback::Empty;
        };

        if self.normalize(typed) == self.normalize(expected) {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    #[must_use]
    pub fn grade(&self, attempt: AnswerAttempt<'_>) -> Feedback {
        self.check(attempt.typed, attempt.expected)
    }

    /// Canonical form used for comparison.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.trim().to_lowercase();
        if self.settings.diacritic_insensitive {
            deunicode(&lowered)
        } else {
            lowered
        }
    }
}
