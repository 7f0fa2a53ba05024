//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionError;

/// Errors from a single scoring-backend call.
///
/// The two variants match the two ways a fire-and-once call can fail: the
/// server answered with a non-success status (its error message, when it
/// sent one, is surfaced verbatim), or no response reached the client at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncError {
    #[error("{message}")]
    Rejected { message: String },
    #[error("network error: {message}")]
    Transport { message: String },
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Transport {
            message: err.to_string(),
        }
    }
}

/// Errors emitted by `QuizFlowService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("complete at least one part first")]
    NothingToFinalize,
    #[error("a request for {target} is already in flight")]
    AlreadyInFlight { target: String },
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Errors emitted while building an `ApiConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiConfigError {
    #[error("invalid API base URL {raw}: {source}")]
    InvalidBaseUrl {
        raw: String,
        source: url::ParseError,
    },
}
