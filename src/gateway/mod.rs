//! Boundary to the remote try-on service.
//!
//! Components only ever see the [`TryOnGateway`] trait. [`HttpGateway`] talks to
//! the storefront backend; [`MockGateway`] scripts answers for tests.

pub mod http;
pub mod mock;

pub use http::HttpGateway;
pub use mock::{GatewayCall, MockGateway};

use crate::model::{
    BatchRequest, BatchResult, GenerationId, GenerationRequest, GenerationResult, HistoryPage,
    HistoryQuery, PhotoGenerationRequest,
};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a gateway.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The request never produced a response (connection, DNS, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("{detail} (status {status})")]
    Rejected { status: u16, detail: String },

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Remote operations the try-on components depend on.
#[async_trait]
pub trait TryOnGateway: Send + Sync {
    /// Generates one composite image. Typically takes several seconds.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError>;

    /// Generates one composite of the garment on an uploaded photo.
    async fn generate_with_photo(
        &self,
        request: &PhotoGenerationRequest,
    ) -> Result<GenerationResult, GatewayError>;

    /// Generates one composite per garment in a single call.
    async fn generate_batch(&self, request: &BatchRequest) -> Result<BatchResult, GatewayError>;

    async fn list_history(&self, query: HistoryQuery) -> Result<HistoryPage, GatewayError>;

    /// Loads one stored generation as the service currently holds it.
    async fn get_session(&self, id: &GenerationId) -> Result<GenerationResult, GatewayError>;

    /// Writes the favorite flag and returns the entry as the service now stores it.
    async fn set_favorite(
        &self,
        id: &GenerationId,
        is_favorite: bool,
    ) -> Result<GenerationResult, GatewayError>;
}
