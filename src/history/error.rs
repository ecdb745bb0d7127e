//! Error types for the history store.

use crate::error::ErrorKind;
use crate::framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum HistoryError {
    /// The page could not be loaded. Previously loaded entries are kept.
    #[error("Failed to load history: {0}")]
    FetchFailed(String),

    /// The favorite flag could not be written. Nothing was changed locally.
    #[error("Failed to update favorite: {0}")]
    FavoriteUpdateFailed(String),

    /// A later fetch was issued before this one completed.
    #[error("History fetch for page {page} superseded by a newer request")]
    Superseded { page: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl HistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HistoryError::FetchFailed(_) => ErrorKind::HistoryFetchFailure,
            HistoryError::FavoriteUpdateFailed(_) => ErrorKind::FavoriteUpdateFailure,
            HistoryError::Superseded { .. } => ErrorKind::Superseded,
            HistoryError::ActorCommunicationError(_) => ErrorKind::Communication,
        }
    }
}

impl From<FrameworkError> for HistoryError {
    fn from(e: FrameworkError) -> Self {
        HistoryError::ActorCommunicationError(e.to_string())
    }
}
