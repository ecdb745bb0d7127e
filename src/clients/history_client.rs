use crate::framework::{Address, ComponentClient, FrameworkError};
use crate::history::{HistoryError, HistoryMessage, HistorySnapshot};
use crate::model::{GenerationId, HistoryEntry, HistoryPage};
use tracing::instrument;

/// Client for interacting with the history store.
#[derive(Clone)]
pub struct HistoryClient {
    address: Address<HistoryMessage>,
}

impl HistoryClient {
    pub fn new(address: Address<HistoryMessage>) -> Self {
        Self { address }
    }

    /// Loads `page` (1-based) and replaces the held page with it.
    #[instrument(skip(self))]
    pub async fn fetch_history(&self, page: u32) -> Result<HistoryPage, HistoryError> {
        self.ask(|respond_to| HistoryMessage::Fetch { page, respond_to })
            .await
    }

    /// Writes the favorite flag and, once confirmed, updates the matching entry.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(
        &self,
        id: GenerationId,
        desired: bool,
    ) -> Result<HistoryEntry, HistoryError> {
        self.ask(|respond_to| HistoryMessage::ToggleFavorite {
            id,
            desired,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, confirmed), fields(id = %confirmed.id))]
    pub async fn apply_favorite(&self, confirmed: HistoryEntry) -> Result<bool, HistoryError> {
        self.query(|respond_to| HistoryMessage::ApplyFavorite {
            confirmed,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<HistorySnapshot, HistoryError> {
        self.query(|respond_to| HistoryMessage::Snapshot { respond_to })
            .await
    }

    pub async fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.snapshot().await?.page.entries)
    }

    pub async fn favorites(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.snapshot().await?.page.favorites())
    }

    pub async fn total_pages(&self) -> Result<u64, HistoryError> {
        Ok(self.snapshot().await?.total_pages())
    }

    pub async fn is_loading(&self) -> Result<bool, HistoryError> {
        Ok(self.snapshot().await?.loading)
    }

    pub async fn error(&self) -> Result<Option<HistoryError>, HistoryError> {
        Ok(self.snapshot().await?.error)
    }

    pub async fn clear_error(&self) -> Result<(), HistoryError> {
        self.tell(HistoryMessage::ClearError).await
    }
}

impl ComponentClient for HistoryClient {
    type Message = HistoryMessage;
    type Error = HistoryError;

    fn address(&self) -> &Address<HistoryMessage> {
        &self.address
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        HistoryError::ActorCommunicationError(e.to_string())
    }
}
