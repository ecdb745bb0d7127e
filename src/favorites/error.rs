//! Error types for the favorite synchronizer.

use crate::error::ErrorKind;
use crate::framework::FrameworkError;
use crate::model::GenerationId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoriteError {
    /// The service refused or never confirmed the write. No local copy changed.
    #[error("Failed to update favorite: {0}")]
    UpdateFailed(String),

    /// A toggle for the same generation is still waiting for the service.
    #[error("Favorite update already in flight for {0}")]
    AlreadyInFlight(GenerationId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl FavoriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FavoriteError::UpdateFailed(_) => ErrorKind::FavoriteUpdateFailure,
            FavoriteError::AlreadyInFlight(_) => ErrorKind::Superseded,
            FavoriteError::ActorCommunicationError(_) => ErrorKind::Communication,
        }
    }
}

impl From<FrameworkError> for FavoriteError {
    fn from(e: FrameworkError) -> Self {
        FavoriteError::ActorCommunicationError(e.to_string())
    }
}
