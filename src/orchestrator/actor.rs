//! The generation orchestrator component.
//!
//! Owns the selection, the current result and the generation phase. Gateway
//! calls run off the mailbox loop through [`Myself::pipe`] and come back as
//! `*Settled` messages carrying the request token they were issued with. Only
//! the completion for the latest token is applied.

use crate::framework::{Actor, Myself};
use crate::gateway::TryOnGateway;
use crate::model::{BatchRequest, BatchResult, GenerationResult, Selection, TryOnRequest};
use crate::orchestrator::messages::{BatchReply, GenerationReply};
use crate::orchestrator::{
    BatchOutcome, GenerationError, GenerationPhase, OrchestratorMessage, OrchestratorSnapshot,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

pub struct Orchestrator {
    selection: Selection,
    phase: GenerationPhase,
    current_result: Option<GenerationResult>,
    batch_result: Option<BatchResult>,
    error: Option<GenerationError>,
    latest_token: u64,
    /// Bumped whenever a confirmed favorite reaches a held copy.
    favorite_revision: u64,
    generation_timeout: Duration,
}

impl Orchestrator {
    pub fn new(generation_timeout: Duration) -> Self {
        Self {
            selection: Selection::default(),
            phase: GenerationPhase::Idle,
            current_result: None,
            batch_result: None,
            error: None,
            latest_token: 0,
            favorite_revision: 0,
            generation_timeout,
        }
    }

    fn snapshot(&self) -> OrchestratorSnapshot {
        OrchestratorSnapshot {
            selection: self.selection.clone(),
            phase: self.phase,
            current_result: self.current_result.clone(),
            batch_result: self.batch_result.clone(),
            error: self.error.clone(),
        }
    }

    /// Issues a new token, which also invalidates every in-flight request.
    fn next_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    fn begin_generation(&mut self) -> u64 {
        self.current_result = None;
        self.batch_result = None;
        self.error = None;
        self.phase = GenerationPhase::Generating;
        self.next_token()
    }

    fn clear_result(&mut self) {
        self.next_token();
        self.current_result = None;
        self.batch_result = None;
        self.error = None;
        self.phase = GenerationPhase::Idle;
    }

    fn reject_selection(&mut self) -> GenerationError {
        warn!(selection = ?self.selection, "Generation requested without a complete selection");
        self.error = Some(GenerationError::InvalidSelection);
        GenerationError::InvalidSelection
    }

    fn start_generation(
        &mut self,
        request: TryOnRequest,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<OrchestratorMessage>,
        respond_to: GenerationReply,
    ) {
        let token = self.begin_generation();
        info!(token, garment_id = %request.garment_id(), photo = request.uses_photo(), "Generation started");

        let gateway = gateway.clone();
        let limit = self.generation_timeout;
        myself.pipe(async move {
            let call = async {
                match &request {
                    TryOnRequest::Catalog(request) => gateway.generate(request).await,
                    TryOnRequest::Photo(request) => gateway.generate_with_photo(request).await,
                }
            };
            let outcome = match tokio::time::timeout(limit, call).await {
                Ok(Ok(result)) => validate_result(result),
                Ok(Err(e)) => Err(GenerationError::GatewayFailure(e.to_string())),
                Err(_) => Err(GenerationError::Timeout(limit)),
            };
            OrchestratorMessage::GenerationSettled {
                token,
                outcome,
                respond_to,
            }
        });
    }

    fn start_batch(
        &mut self,
        request: BatchRequest,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<OrchestratorMessage>,
        respond_to: BatchReply,
    ) {
        let token = self.begin_generation();
        info!(token, model_id = %request.model_id, garments = request.garment_ids.len(), "Batch generation started");

        let gateway = gateway.clone();
        let limit = self.generation_timeout;
        myself.pipe(async move {
            let outcome = match tokio::time::timeout(limit, gateway.generate_batch(&request)).await {
                Ok(Ok(batch)) => Ok(batch),
                Ok(Err(e)) => Err(GenerationError::GatewayFailure(e.to_string())),
                Err(_) => Err(GenerationError::Timeout(limit)),
            };
            OrchestratorMessage::BatchSettled {
                token,
                outcome,
                respond_to,
            }
        });
    }

    fn generate_batch(
        &mut self,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<OrchestratorMessage>,
        respond_to: BatchReply,
    ) {
        let Some(model_id) = self.selection.model().cloned() else {
            let _ = respond_to.send(Err(self.reject_selection()));
            return;
        };

        let garments = self.selection.batch_garments.clone();
        match garments.as_slice() {
            [] => {
                let _ = respond_to.send(Err(self.reject_selection()));
            }
            [garment_id] => {
                self.selection.garment_id = Some(garment_id.clone());
                let Some(request) = self.selection.try_on_request() else {
                    let _ = respond_to.send(Err(self.reject_selection()));
                    return;
                };
                let (reply, single) = oneshot::channel();
                self.start_generation(request, gateway, myself, reply);
                tokio::spawn(async move {
                    let outcome = match single.await {
                        Ok(outcome) => outcome.map(BatchOutcome::Single),
                        Err(_) => Err(GenerationError::ActorCommunicationError(
                            "orchestrator dropped the generation reply".to_string(),
                        )),
                    };
                    let _ = respond_to.send(outcome);
                });
            }
            // The batch endpoint only takes catalog models.
            _ if model_id.is_user_upload() => {
                let _ = respond_to.send(Err(self.reject_selection()));
            }
            garments => {
                let request = BatchRequest {
                    model_id,
                    garment_ids: garments.to_vec(),
                };
                self.start_batch(request, gateway, myself, respond_to);
            }
        }
    }

    fn refresh_result(
        &self,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<OrchestratorMessage>,
        respond_to: GenerationReply,
    ) {
        let Some(current) = &self.current_result else {
            let _ = respond_to.send(Err(GenerationError::NoResult));
            return;
        };
        let id = current.id.clone();
        let token = self.latest_token;
        let favorite_revision = self.favorite_revision;
        debug!(token, %id, "Refreshing result");

        let gateway = gateway.clone();
        let limit = self.generation_timeout;
        myself.pipe(async move {
            let outcome = match tokio::time::timeout(limit, gateway.get_session(&id)).await {
                Ok(Ok(result)) => validate_result(result),
                Ok(Err(e)) => Err(GenerationError::GatewayFailure(e.to_string())),
                Err(_) => Err(GenerationError::Timeout(limit)),
            };
            OrchestratorMessage::RefreshSettled {
                token,
                favorite_revision,
                outcome,
                respond_to,
            }
        });
    }

    /// A failed refresh keeps the held result and leaves the error slot alone.
    fn settle_refresh(
        &mut self,
        token: u64,
        favorite_revision: u64,
        outcome: Result<GenerationResult, GenerationError>,
        respond_to: GenerationReply,
    ) {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding stale refresh");
            let _ = respond_to.send(Err(GenerationError::Abandoned));
            return;
        }

        let outcome = outcome.map(|mut fresh| {
            if let Some(held) = self.current_result.as_mut().filter(|held| held.id == fresh.id) {
                // A favorite confirmed meanwhile is newer than the fetched copy.
                if favorite_revision != self.favorite_revision {
                    fresh.is_favorite = held.is_favorite;
                }
                *held = fresh.clone();
            }
            fresh
        });
        if let Err(e) = &outcome {
            warn!(token, error = %e, "Refresh failed");
        }
        let _ = respond_to.send(outcome);
    }

    fn settle_generation(
        &mut self,
        token: u64,
        outcome: Result<GenerationResult, GenerationError>,
        respond_to: GenerationReply,
    ) {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding stale generation");
            let _ = respond_to.send(Err(GenerationError::Abandoned));
            return;
        }

        match &outcome {
            Ok(result) => {
                info!(token, id = %result.id, ms = result.processing_time_ms, "Generation completed");
                self.current_result = Some(result.clone());
                self.error = None;
                self.phase = GenerationPhase::Completed;
            }
            Err(e) => {
                warn!(token, error = %e, "Generation failed");
                self.current_result = None;
                self.error = Some(e.clone());
                self.phase = GenerationPhase::Failed;
            }
        }
        let _ = respond_to.send(outcome);
    }

    fn settle_batch(
        &mut self,
        token: u64,
        outcome: Result<BatchResult, GenerationError>,
        respond_to: BatchReply,
    ) {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding stale batch");
            let _ = respond_to.send(Err(GenerationError::Abandoned));
            return;
        }

        match &outcome {
            Ok(batch) => {
                info!(token, batch_id = %batch.batch_id, garments = batch.product_count, "Batch completed");
                self.batch_result = Some(batch.clone());
                self.error = None;
                self.phase = GenerationPhase::Completed;
            }
            Err(e) => {
                warn!(token, error = %e, "Batch failed");
                self.batch_result = None;
                self.error = Some(e.clone());
                self.phase = GenerationPhase::Failed;
            }
        }
        let _ = respond_to.send(outcome.map(BatchOutcome::Batch));
    }

    /// Returns true if any held copy of the generation was updated.
    fn apply_favorite(&mut self, confirmed: &GenerationResult) -> bool {
        let mut updated = false;
        let batch_results = self.batch_result.iter_mut().flat_map(|batch| {
            batch
                .individual_results
                .iter_mut()
                .chain(batch.combined_result.iter_mut())
        });
        for held in self.current_result.iter_mut().chain(batch_results) {
            if held.id == confirmed.id {
                held.is_favorite = confirmed.is_favorite;
                updated = true;
            }
        }
        if updated {
            self.favorite_revision += 1;
        }
        updated
    }
}

// A completed status without an image is as unusable as a failure.
fn validate_result(result: GenerationResult) -> Result<GenerationResult, GenerationError> {
    if result.result_image().is_some() {
        Ok(result)
    } else {
        Err(GenerationError::GatewayFailure(format!(
            "generation {} returned status {:?} without an image",
            result.id, result.status
        )))
    }
}

#[async_trait]
impl Actor for Orchestrator {
    type Message = OrchestratorMessage;
    type Context = Arc<dyn TryOnGateway>;

    fn name() -> &'static str {
        "orchestrator"
    }

    async fn handle(
        &mut self,
        msg: OrchestratorMessage,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<OrchestratorMessage>,
    ) {
        match msg {
            OrchestratorMessage::SetModel(model_id) => self.selection.model_id = model_id,
            OrchestratorMessage::SetGarment(garment_id) => self.selection.garment_id = garment_id,
            OrchestratorMessage::SetUserPhoto(Some(photo)) => self.selection.set_user_photo(photo),
            OrchestratorMessage::SetUserPhoto(None) => self.selection.clear_user_photo(),
            OrchestratorMessage::ToggleBatchGarment {
                garment_id,
                respond_to,
            } => {
                self.selection.toggle_batch_garment(garment_id);
                let _ = respond_to.send(self.selection.batch_garments.clone());
            }
            OrchestratorMessage::ClearBatchGarments => {
                self.selection.clear_batch_garments();
                self.batch_result = None;
            }
            OrchestratorMessage::Generate { respond_to } => {
                match self.selection.try_on_request() {
                    Some(request) => self.start_generation(request, gateway, myself, respond_to),
                    None => {
                        let _ = respond_to.send(Err(self.reject_selection()));
                    }
                }
            }
            OrchestratorMessage::GenerateBatch { respond_to } => {
                self.generate_batch(gateway, myself, respond_to)
            }
            OrchestratorMessage::RefreshResult { respond_to } => {
                self.refresh_result(gateway, myself, respond_to)
            }
            OrchestratorMessage::ClearResult => self.clear_result(),
            OrchestratorMessage::ClearError => self.error = None,
            OrchestratorMessage::Reset => {
                self.clear_result();
                self.selection.clear();
                info!("Session reset");
            }
            OrchestratorMessage::ApplyFavorite {
                confirmed,
                respond_to,
            } => {
                let _ = respond_to.send(self.apply_favorite(&confirmed));
            }
            OrchestratorMessage::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            OrchestratorMessage::GenerationSettled {
                token,
                outcome,
                respond_to,
            } => self.settle_generation(token, outcome, respond_to),
            OrchestratorMessage::RefreshSettled {
                token,
                favorite_revision,
                outcome,
                respond_to,
            } => self.settle_refresh(token, favorite_revision, outcome, respond_to),
            OrchestratorMessage::BatchSettled {
                token,
                outcome,
                respond_to,
            } => self.settle_batch(token, outcome, respond_to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GenerationId, GenerationStatus};

    #[test]
    fn test_validate_rejects_unusable_results() {
        assert!(validate_result(GenerationResult::completed("t1", "a.png")).is_ok());

        let empty = GenerationResult::completed("t2", "");
        assert!(matches!(validate_result(empty), Err(GenerationError::GatewayFailure(_))));

        let mut pending = GenerationResult::completed("t3", "a.png");
        pending.status = GenerationStatus::Processing;
        assert!(matches!(validate_result(pending), Err(GenerationError::GatewayFailure(_))));
    }

    #[test]
    fn test_clear_result_invalidates_tokens() {
        let mut orchestrator = Orchestrator::new(Duration::from_secs(30));
        let token = orchestrator.begin_generation();
        orchestrator.clear_result();
        assert_ne!(token, orchestrator.latest_token);
        assert_eq!(orchestrator.phase, GenerationPhase::Idle);
    }

    #[test]
    fn test_apply_favorite_reaches_batch_copies() {
        let mut orchestrator = Orchestrator::new(Duration::from_secs(30));
        orchestrator.batch_result = Some(BatchResult {
            batch_id: "b1".to_string(),
            individual_results: vec![
                GenerationResult::completed("t1", "a.png"),
                GenerationResult::completed("t2", "b.png"),
            ],
            combined_result: Some(GenerationResult::completed("t3", "c.png")),
            total_processing_time_ms: 0,
            product_count: 2,
        });

        let mut confirmed = GenerationResult::completed("t2", "b.png");
        confirmed.is_favorite = true;
        assert!(orchestrator.apply_favorite(&confirmed));

        let batch = orchestrator.batch_result.as_ref().unwrap();
        assert!(!batch.individual_results[0].is_favorite);
        assert!(batch.individual_results[1].is_favorite);

        confirmed.id = GenerationId::from("missing");
        assert!(!orchestrator.apply_favorite(&confirmed));
    }
}
