use crate::clients::{HistoryClient, OrchestratorClient};
use crate::favorites::messages::ToggleReply;
use crate::favorites::{FavoriteError, FavoriteMessage, FavoriteUpdate};
use crate::framework::{Actor, Myself};
use crate::gateway::TryOnGateway;
use crate::model::{GenerationId, GenerationResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Dependencies injected when the synchronizer starts.
pub struct FavoriteContext {
    pub gateway: Arc<dyn TryOnGateway>,
    pub orchestrator: OrchestratorClient,
    pub history: HistoryClient,
}

/// Single entry point for favorite toggles.
///
/// Sends exactly one write per toggle and, once the service confirms it,
/// copies the confirmed flag into the orchestrator and the history store.
pub struct FavoriteSynchronizer {
    in_flight: HashSet<GenerationId>,
    request_timeout: Duration,
}

impl FavoriteSynchronizer {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            in_flight: HashSet::new(),
            request_timeout,
        }
    }

    fn toggle(
        &mut self,
        id: GenerationId,
        desired: bool,
        ctx: &FavoriteContext,
        myself: &Myself<FavoriteMessage>,
        respond_to: ToggleReply,
    ) {
        if !self.in_flight.insert(id.clone()) {
            warn!(%id, "Favorite toggle ignored, previous write still pending");
            let _ = respond_to.send(Err(FavoriteError::AlreadyInFlight(id)));
            return;
        }

        let gateway = ctx.gateway.clone();
        let limit = self.request_timeout;
        myself.pipe(async move {
            let outcome = match tokio::time::timeout(limit, gateway.set_favorite(&id, desired)).await {
                Ok(Ok(confirmed)) => Ok(confirmed),
                Ok(Err(e)) => Err(FavoriteError::UpdateFailed(e.to_string())),
                Err(_) => Err(FavoriteError::UpdateFailed(format!(
                    "timed out after {}s",
                    limit.as_secs()
                ))),
            };
            FavoriteMessage::Settled {
                id,
                outcome,
                respond_to,
            }
        });
    }

    async fn settle(
        &mut self,
        id: GenerationId,
        outcome: Result<GenerationResult, FavoriteError>,
        ctx: &FavoriteContext,
        respond_to: ToggleReply,
    ) {
        let result = match outcome {
            Ok(confirmed) => reconcile(confirmed, ctx).await,
            Err(e) => {
                warn!(%id, error = %e, "Favorite update failed");
                Err(e)
            }
        };
        // Released only after both copies are reconciled.
        self.in_flight.remove(&id);
        let _ = respond_to.send(result);
    }
}

/// Copies the confirmed flag into both components.
///
/// Both are always tried. If either cannot be reached the toggle reports
/// [`FavoriteError::ActorCommunicationError`], even though the service
/// already stored the write.
async fn reconcile(
    confirmed: GenerationResult,
    ctx: &FavoriteContext,
) -> Result<FavoriteUpdate, FavoriteError> {
    let current_result = ctx.orchestrator.apply_favorite(confirmed.clone()).await;
    let history_entry = ctx.history.apply_favorite(confirmed.clone()).await;

    let current_result_updated = current_result.map_err(|e| {
        warn!(id = %confirmed.id, error = %e, "Could not update current result");
        FavoriteError::ActorCommunicationError(format!("current result unreachable: {e}"))
    })?;
    let history_entry_updated = history_entry.map_err(|e| {
        warn!(id = %confirmed.id, error = %e, "Could not update history entry");
        FavoriteError::ActorCommunicationError(format!("history unreachable: {e}"))
    })?;

    info!(
        id = %confirmed.id,
        is_favorite = confirmed.is_favorite,
        current_result_updated,
        history_entry_updated,
        "Favorite synchronized"
    );
    Ok(FavoriteUpdate {
        generation: confirmed,
        current_result_updated,
        history_entry_updated,
    })
}

#[async_trait]
impl Actor for FavoriteSynchronizer {
    type Message = FavoriteMessage;
    type Context = FavoriteContext;

    fn name() -> &'static str {
        "favorites"
    }

    async fn handle(
        &mut self,
        msg: FavoriteMessage,
        ctx: &FavoriteContext,
        myself: &Myself<FavoriteMessage>,
    ) {
        match msg {
            FavoriteMessage::Toggle {
                id,
                desired,
                respond_to,
            } => self.toggle(id, desired, ctx, myself, respond_to),
            FavoriteMessage::Pending { respond_to } => {
                let mut pending: Vec<_> = self.in_flight.iter().cloned().collect();
                pending.sort();
                let _ = respond_to.send(pending);
            }
            FavoriteMessage::Settled {
                id,
                outcome,
                respond_to,
            } => self.settle(id, outcome, ctx, respond_to).await,
        }
    }
}
