//! Shared error types for the services crate.

use thiserror::Error;

use listen_core::model::{Category, RecordingSetError};
use storage::fs::FsInitError;
use storage::repository::StorageError;

/// Errors emitted while building the `RecordingLibrary`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LibraryError {
    #[error("no category contains any recordings")]
    NoRecordings,
    #[error("unknown category: {0}")]
    UnknownCategory(Category),
    #[error(transparent)]
    RecordingSet(#[from] RecordingSetError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by listening and typing sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no listening categories available")]
    NoListeningCategory,
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error("audio unavailable: {0}")]
    Audio(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Filesystem(#[from] FsInitError),
    #[error(transparent)]
    Library(#[from] LibraryError),
}
