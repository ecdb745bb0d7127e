//! Error types for the generation orchestrator.

use crate::error::ErrorKind;
use crate::framework::FrameworkError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while generating a try-on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    /// Generation was requested before a model and a garment were picked.
    #[error("Please select both a model and a garment")]
    InvalidSelection,

    /// A refresh was requested while no result is held.
    #[error("No try-on result to refresh")]
    NoResult,

    /// The backend failed or returned an unusable result.
    #[error("Try-on generation failed: {0}")]
    GatewayFailure(String),

    /// The backend did not answer within the client-side limit.
    #[error("Try-on generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// A newer generation, `clear_result` or `reset` replaced this request.
    #[error("Generation abandoned")]
    Abandoned,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::InvalidSelection | GenerationError::NoResult => {
                ErrorKind::InvalidSelection
            }
            GenerationError::GatewayFailure(_) => ErrorKind::GatewayFailure,
            GenerationError::Timeout(_) => ErrorKind::Timeout,
            GenerationError::Abandoned => ErrorKind::Superseded,
            GenerationError::ActorCommunicationError(_) => ErrorKind::Communication,
        }
    }
}

impl From<FrameworkError> for GenerationError {
    fn from(e: FrameworkError) -> Self {
        GenerationError::ActorCommunicationError(e.to_string())
    }
}
