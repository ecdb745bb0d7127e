use crate::favorites::{FavoriteError, FavoriteMessage, FavoriteUpdate};
use crate::framework::{Address, ComponentClient, FrameworkError};
use crate::model::GenerationId;
use tracing::{info, instrument};

/// Client for the favorite synchronizer.
#[derive(Clone)]
pub struct FavoriteClient {
    address: Address<FavoriteMessage>,
}

impl FavoriteClient {
    pub fn new(address: Address<FavoriteMessage>) -> Self {
        Self { address }
    }

    /// Sets the favorite flag of a generation everywhere it is held.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(
        &self,
        id: GenerationId,
        desired: bool,
    ) -> Result<FavoriteUpdate, FavoriteError> {
        info!("Sending favorite toggle to actor");
        self.ask(|respond_to| FavoriteMessage::Toggle {
            id,
            desired,
            respond_to,
        })
        .await
    }

    /// Generations whose favorite write is still pending.
    pub async fn pending(&self) -> Result<Vec<GenerationId>, FavoriteError> {
        self.query(|respond_to| FavoriteMessage::Pending { respond_to })
            .await
    }
}

impl ComponentClient for FavoriteClient {
    type Message = FavoriteMessage;
    type Error = FavoriteError;

    fn address(&self) -> &Address<FavoriteMessage> {
        &self.address
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        FavoriteError::ActorCommunicationError(e.to_string())
    }
}
