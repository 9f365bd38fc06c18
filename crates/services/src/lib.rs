#![forbid(unsafe_code)]

pub mod error;

mod app_services;
mod library;
mod listening;
mod typing;

pub use listen_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, LibraryError, SessionError};
pub use library::RecordingLibrary;
pub use listening::ListeningSession;
pub use typing::TypingSession;
