//! REST client for the storefront's try-on endpoints.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | generate | `POST {base}/tryon` |
//! | generate_with_photo | `POST {base}/tryon/with-photo` (multipart) |
//! | generate_batch | `POST {base}/tryon/batch` |
//! | list_history | `GET {base}/tryon/history?page=&limit=` |
//! | get_session | `GET {base}/tryon/{id}` |
//! | set_favorite | `PATCH {base}/tryon/{id}/favorite` |

use crate::config::StudioConfig;
use crate::gateway::{GatewayError, TryOnGateway};
use crate::model::{
    BatchRequest, BatchResult, GenerationId, GenerationRequest, GenerationResult, HistoryEntry,
    HistoryPage, HistoryQuery, PhotoGenerationRequest,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// HTTP implementation of [`TryOnGateway`].
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

/// Listing body as returned by the backend.
#[derive(Debug, Deserialize)]
struct HistoryListing {
    #[serde(alias = "sessions")]
    entries: Vec<HistoryEntry>,
    total: u64,
    page: u32,
    limit: u32,
}

impl From<HistoryListing> for HistoryPage {
    fn from(listing: HistoryListing) -> Self {
        HistoryPage {
            entries: listing.entries,
            total_count: listing.total,
            page_number: listing.page,
            page_size: listing.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl HttpGateway {
    /// * `base_url` - API root, e.g. `http://localhost:8000/api/v1`.
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, auth_token)
    }

    /// Reuses an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        auth_token: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            auth_token,
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.auth_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback_detail: &str,
    ) -> Result<T, GatewayError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let response = Self::ensure_success(response, fallback_detail).await?;
        Self::parse_response(response).await
    }

    /// Returns the response unchanged on success, otherwise a
    /// [`GatewayError::Rejected`] carrying the body's `detail` message.
    async fn ensure_success(
        response: reqwest::Response,
        fallback_detail: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body).unwrap_or_else(|| fallback_detail.to_string());
        warn!(status = status.as_u16(), %detail, "Request rejected");
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

// `detail` is usually a string but validation errors carry a JSON array.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl TryOnGateway for HttpGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError> {
        debug!(model_id = %request.model_id, garment_id = %request.garment_id, "POST /tryon");
        let builder = self.client.post(self.url("/tryon")).json(request);
        self.execute(builder, "Try-on generation failed").await
    }

    async fn generate_with_photo(
        &self,
        request: &PhotoGenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        debug!(garment_id = %request.garment_id, bytes = request.photo.len(), "POST /tryon/with-photo");
        let photo = Part::bytes(request.photo.bytes().to_vec())
            .file_name(request.photo.file_name().to_string())
            .mime_str(request.photo.content_type())
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let form = Form::new()
            .part("file", photo)
            .text("product_id", request.garment_id.as_str().to_string());
        let builder = self.client.post(self.url("/tryon/with-photo")).multipart(form);
        self.execute(builder, "Try-on generation failed").await
    }

    async fn generate_batch(&self, request: &BatchRequest) -> Result<BatchResult, GatewayError> {
        debug!(model_id = %request.model_id, garments = request.garment_ids.len(), "POST /tryon/batch");
        let builder = self.client.post(self.url("/tryon/batch")).json(request);
        self.execute(builder, "Batch try-on generation failed").await
    }

    async fn list_history(&self, query: HistoryQuery) -> Result<HistoryPage, GatewayError> {
        debug!(page = query.page, limit = query.page_size, "GET /tryon/history");
        let builder = self
            .client
            .get(self.url("/tryon/history"))
            .query(&[("page", query.page), ("limit", query.page_size)]);
        let listing: HistoryListing = self.execute(builder, "Failed to fetch history").await?;
        Ok(listing.into())
    }

    async fn get_session(&self, id: &GenerationId) -> Result<GenerationResult, GatewayError> {
        debug!(%id, "GET /tryon/{{id}}");
        let builder = self.client.get(self.url(&format!("/tryon/{id}")));
        self.execute(builder, "Failed to fetch session").await
    }

    async fn set_favorite(
        &self,
        id: &GenerationId,
        is_favorite: bool,
    ) -> Result<GenerationResult, GatewayError> {
        debug!(%id, is_favorite, "PATCH /tryon/{{id}}/favorite");
        let builder = self
            .client
            .patch(self.url(&format!("/tryon/{id}/favorite")))
            .json(&serde_json::json!({ "is_favorite": is_favorite }));
        self.execute(builder, "Failed to update favorite").await
    }
}
