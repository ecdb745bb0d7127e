use crate::favorites::FavoriteError;
use crate::framework::Response;
use crate::model::{GenerationId, GenerationResult};

/// A confirmed favorite write and which local copies it reached.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteUpdate {
    /// The generation as the service now stores it.
    pub generation: GenerationResult,
    pub current_result_updated: bool,
    pub history_entry_updated: bool,
}

pub type ToggleReply = Response<Result<FavoriteUpdate, FavoriteError>>;

#[derive(Debug)]
pub enum FavoriteMessage {
    Toggle {
        id: GenerationId,
        desired: bool,
        respond_to: ToggleReply,
    },
    /// Ids with a write still waiting for the service.
    Pending {
        respond_to: Response<Vec<GenerationId>>,
    },
    Settled {
        id: GenerationId,
        outcome: Result<GenerationResult, FavoriteError>,
        respond_to: ToggleReply,
    },
}
