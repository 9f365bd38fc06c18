use thiserror::Error;

use crate::model::answer::CheckerSettings;
use crate::model::ids::Category;

/// Category that holds the typing-exercise recordings.
pub const DEFAULT_TYPING_CATEGORY: &str = "for_typing";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeSettings {
    diacritic_insensitive: bool,
    typing_category: Category,
    shuffle: bool,
    shuffle_seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct PracticeSettingsDraft {
    pub diacritic_insensitive: bool,
    pub typing_category: Option<String>,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeSettingsError {
    #[error("typing category cannot be empty")]
    EmptyTypingCategory,
    #[error("a shuffle seed was given but shuffling is disabled")]
    SeedWithoutShuffle,
}

impl Default for PracticeSettingsDraft {
    fn default() -> Self {
        Self {
            diacritic_insensitive: true,
            typing_category: None,
            shuffle: true,
            shuffle_seed: None,
        }
    }
}

impl PracticeSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `PracticeSettingsError` if the typing category is blank or a
    /// seed is combined with disabled shuffling.
    pub fn validate(self) -> Result<PracticeSettings, PracticeSettingsError> {
        let typing_category = match self.typing_category {
            Some(name) => {
                Category::new(name).map_err(|_| PracticeSettingsError::EmptyTypingCategory)?
            }
            None => Category::new(DEFAULT_TYPING_CATEGORY)
                .map_err(|_| PracticeSettingsError::EmptyTypingCategory)?,
        };

        if !self.shuffle && self.shuffle_seed.is_some() {
            return Err(PracticeSettingsError::SeedWithoutShuffle);
        }

        Ok(PracticeSettings {
            diacritic_insensitive: self.diacritic_insensitive,
            typing_category,
            shuffle: self.shuffle,
            shuffle_seed: self.shuffle_seed,
        })
    }
}

impl PracticeSettings {
    #[must_use]
    pub fn diacritic_insensitive(&self) -> bool {
        self.diacritic_insensitive
    }

    #[must_use]
    pub fn typing_category(&self) -> &Category {
        &self.typing_category
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    #[must_use]
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }

    #[must_use]
    pub fn checker_settings(&self) -> CheckerSettings {
        CheckerSettings {
            diacritic_insensitive: self.diacritic_insensitive,
        }
    }
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            diacritic_insensitive: true,
            typing_category: Category(DEFAULT_TYPING_CATEGORY.to_owned()),
            shuffle: true,
            shuffle_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_matches_default_settings() {
        let settings = PracticeSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, PracticeSettings::default());
        assert_eq!(settings.typing_category().as_str(), "for_typing");
        assert!(settings.checker_settings().diacritic_insensitive);
    }

    #[test]
    fn blank_typing_category_is_rejected() {
        let draft = PracticeSettingsDraft {
            typing_category: Some("  ".into()),
            ..PracticeSettingsDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            PracticeSettingsError::EmptyTypingCategory
        );
    }

    #[test]
    fn seed_requires_shuffle() {
        let draft = PracticeSettingsDraft {
            shuffle: false,
            shuffle_seed: Some(7),
            ..PracticeSettingsDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            PracticeSettingsError::SeedWithoutShuffle
        );
    }

    #[test]
    fn strict_accents_flow_into_checker() {
        let settings = PracticeSettingsDraft {
            diacritic_insensitive: false,
            typing_category: Some(" dictation ".into()),
            ..PracticeSettingsDraft::default()
        }
        .validate()
        .unwrap();
        assert!(!settings.checker_settings().diacritic_insensitive);
        assert_eq!(settings.typing_category().as_str(), "dictation");
    }
}
