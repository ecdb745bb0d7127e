use crate::framework::{Address, ComponentClient, FrameworkError};
use crate::model::{GarmentId, GenerationResult, ModelId, Selection, UserPhoto};
use crate::orchestrator::{BatchOutcome, GenerationError, OrchestratorMessage, OrchestratorSnapshot};
use tracing::{debug, instrument};

/// Client for interacting with the generation orchestrator.
#[derive(Clone)]
pub struct OrchestratorClient {
    address: Address<OrchestratorMessage>,
}

impl OrchestratorClient {
    pub fn new(address: Address<OrchestratorMessage>) -> Self {
        Self { address }
    }

    #[instrument(skip(self))]
    pub async fn set_model(&self, model_id: ModelId) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::SetModel(Some(model_id))).await
    }

    pub async fn clear_model(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::SetModel(None)).await
    }

    #[instrument(skip(self))]
    pub async fn set_garment(&self, garment_id: GarmentId) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::SetGarment(Some(garment_id))).await
    }

    pub async fn clear_garment(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::SetGarment(None)).await
    }

    /// Uses an uploaded photo as the model for following generations.
    #[instrument(skip(self))]
    pub async fn set_user_photo(&self, photo: UserPhoto) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::SetUserPhoto(Some(photo))).await
    }

    /// Drops the uploaded photo and the model choice it stood for.
    pub async fn clear_user_photo(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::SetUserPhoto(None)).await
    }

    /// Adds or removes a garment from the batch pick and returns the new pick.
    #[instrument(skip(self))]
    pub async fn toggle_batch_garment(
        &self,
        garment_id: GarmentId,
    ) -> Result<Vec<GarmentId>, GenerationError> {
        self.query(|respond_to| OrchestratorMessage::ToggleBatchGarment {
            garment_id,
            respond_to,
        })
        .await
    }

    pub async fn clear_batch_garments(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::ClearBatchGarments).await
    }

    /// Generates a try-on for the current selection.
    ///
    /// Resolves once the backend answers, fails, or times out. Returns
    /// [`GenerationError::Abandoned`] if a newer generation, `clear_result` or
    /// `reset` replaced this one in the meantime.
    #[instrument(skip(self))]
    pub async fn generate(&self) -> Result<GenerationResult, GenerationError> {
        debug!("Sending generate to actor");
        self.ask(|respond_to| OrchestratorMessage::Generate { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn generate_batch(&self) -> Result<BatchOutcome, GenerationError> {
        debug!("Sending generate_batch to actor");
        self.ask(|respond_to| OrchestratorMessage::GenerateBatch { respond_to })
            .await
    }

    /// Reloads the held result from the service and returns the fresh copy.
    ///
    /// Fails with [`GenerationError::NoResult`] when nothing is held. A failed
    /// refresh keeps the held result.
    #[instrument(skip(self))]
    pub async fn refresh_result(&self) -> Result<GenerationResult, GenerationError> {
        self.ask(|respond_to| OrchestratorMessage::RefreshResult { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn clear_result(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::ClearResult).await
    }

    pub async fn clear_error(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::ClearError).await
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), GenerationError> {
        self.tell(OrchestratorMessage::Reset).await
    }

    /// Copies a confirmed favorite flag onto the held result. Returns true if it matched.
    #[instrument(skip(self, confirmed), fields(id = %confirmed.id))]
    pub async fn apply_favorite(&self, confirmed: GenerationResult) -> Result<bool, GenerationError> {
        self.query(|respond_to| OrchestratorMessage::ApplyFavorite {
            confirmed,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<OrchestratorSnapshot, GenerationError> {
        self.query(|respond_to| OrchestratorMessage::Snapshot { respond_to })
            .await
    }

    pub async fn selection(&self) -> Result<Selection, GenerationError> {
        Ok(self.snapshot().await?.selection)
    }

    pub async fn current_result(&self) -> Result<Option<GenerationResult>, GenerationError> {
        Ok(self.snapshot().await?.current_result)
    }

    pub async fn is_generating(&self) -> Result<bool, GenerationError> {
        Ok(self.snapshot().await?.is_generating())
    }

    pub async fn error(&self) -> Result<Option<GenerationError>, GenerationError> {
        Ok(self.snapshot().await?.error)
    }
}

impl ComponentClient for OrchestratorClient {
    type Message = OrchestratorMessage;
    type Error = GenerationError;

    fn address(&self) -> &Address<OrchestratorMessage> {
        &self.address
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        GenerationError::ActorCommunicationError(e.to_string())
    }
}
