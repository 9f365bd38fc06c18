use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("category name cannot be empty")]
    EmptyCategory,

    #[error("recording identifier cannot be empty")]
    EmptyRecordingId,
}

/// Name of a recording group, e.g. a topic folder or the typing pool.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Category(pub(crate) String);

impl Category {
    /// Creates a new `Category` from a trimmed, non-empty name.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyCategory` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, IdError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(IdError::EmptyCategory);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a single recording.
///
/// This is the file stem of the audio asset and also the expected
/// transcription in typing mode, so it is kept verbatim (no trimming).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordingId(String);

impl RecordingId {
    /// Creates a new `RecordingId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyRecordingId` if the identifier is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdError::EmptyRecordingId);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes) in the identifier.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({:?})", self.0)
    }
}

impl fmt::Debug for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordingId({:?})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Category {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for RecordingId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_trimmed() {
        let category = Category::new("  animals ").unwrap();
        assert_eq!(category.as_str(), "animals");
        assert_eq!(category.to_string(), "animals");
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert_eq!(Category::new("   "), Err(IdError::EmptyCategory));
        assert_eq!(RecordingId::new(""), Err(IdError::EmptyRecordingId));
        assert_eq!(" \t".parse::<RecordingId>(), Err(IdError::EmptyRecordingId));
    }

    #[test]
    fn recording_id_counts_chars_not_bytes() {
        let id = RecordingId::new("körte").unwrap();
        assert_eq!(id.char_len(), 5);
        assert_eq!(id.as_str().len(), 6);
    }

    #[test]
    fn debug_shows_wrapped_value() {
        let id: RecordingId = "alma".parse().unwrap();
        assert_eq!(format!("{id:?}"), "RecordingId(\"alma\")");
    }
}
