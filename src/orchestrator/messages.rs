use crate::framework::Response;
use crate::model::{BatchResult, GarmentId, GenerationResult, ModelId, Selection, UserPhoto};
use crate::orchestrator::GenerationError;

/// Where the orchestrator is in its generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
    Completed,
    Failed,
}

/// What a batch generation produced.
///
/// A batch of one garment runs as a plain generation.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Single(GenerationResult),
    Batch(BatchResult),
}

/// Consistent copy of the orchestrator's state at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestratorSnapshot {
    pub selection: Selection,
    pub phase: GenerationPhase,
    pub current_result: Option<GenerationResult>,
    pub batch_result: Option<BatchResult>,
    pub error: Option<GenerationError>,
}

impl OrchestratorSnapshot {
    pub fn is_generating(&self) -> bool {
        self.phase == GenerationPhase::Generating
    }
}

pub type GenerationReply = Response<Result<GenerationResult, GenerationError>>;
pub type BatchReply = Response<Result<BatchOutcome, GenerationError>>;

#[derive(Debug)]
pub enum OrchestratorMessage {
    SetModel(Option<ModelId>),
    SetGarment(Option<GarmentId>),
    /// `Some` switches the model to the uploaded photo, `None` drops both.
    SetUserPhoto(Option<UserPhoto>),
    ToggleBatchGarment {
        garment_id: GarmentId,
        respond_to: Response<Vec<GarmentId>>,
    },
    ClearBatchGarments,
    Generate {
        respond_to: GenerationReply,
    },
    GenerateBatch {
        respond_to: BatchReply,
    },
    /// Reloads the held result from the service.
    RefreshResult {
        respond_to: GenerationReply,
    },
    ClearResult,
    ClearError,
    Reset,
    /// Copies a server-confirmed favorite flag onto every held copy of that generation.
    ApplyFavorite {
        confirmed: GenerationResult,
        respond_to: Response<bool>,
    },
    Snapshot {
        respond_to: Response<OrchestratorSnapshot>,
    },
    GenerationSettled {
        token: u64,
        outcome: Result<GenerationResult, GenerationError>,
        respond_to: GenerationReply,
    },
    RefreshSettled {
        token: u64,
        favorite_revision: u64,
        outcome: Result<GenerationResult, GenerationError>,
        respond_to: GenerationReply,
    },
    BatchSettled {
        token: u64,
        outcome: Result<BatchResult, GenerationError>,
        respond_to: BatchReply,
    },
}
