use crate::clients::{FavoriteClient, HistoryClient, OrchestratorClient};
use crate::config::StudioConfig;
use crate::favorites::FavoriteContext;
use crate::framework::FrameworkError;
use crate::gateway::TryOnGateway;
use std::sync::Arc;
use tracing::{error, info};

/// Runtime container for the try-on components.
///
/// `TryOnSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the orchestrator, the
///   history store and the favorite synchronizer
/// - **Dependency Wiring**: every component shares one gateway, and the
///   synchronizer receives the orchestrator and history clients
///
/// # Example
///
/// ```ignore
/// let system = TryOnSystem::new(gateway, &StudioConfig::default());
///
/// system.orchestrator.set_model("m1".into()).await?;
/// system.orchestrator.set_garment("g1".into()).await?;
/// let result = system.orchestrator.generate().await?;
/// system.favorites.toggle_favorite(result.id, true).await?;
///
/// system.shutdown().await?;
/// ```
pub struct TryOnSystem {
    pub orchestrator: OrchestratorClient,
    pub history: HistoryClient,
    pub favorites: FavoriteClient,

    /// Task handles for all running components (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TryOnSystem {
    /// Creates every component and spawns each on its own task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(gateway: Arc<dyn TryOnGateway>, config: &StudioConfig) -> Self {
        // 1. Create components (no dependencies yet)
        let (orchestrator_runner, orchestrator) = crate::orchestrator::new(config);
        let (history_runner, history) = crate::history::new(config);
        let (favorites_runner, favorites) = crate::favorites::new(config);

        // 2. Start them with injected context
        let orchestrator_handle = tokio::spawn(orchestrator_runner.run(gateway.clone()));
        let history_handle = tokio::spawn(history_runner.run(gateway.clone()));
        let favorites_handle = tokio::spawn(favorites_runner.run(FavoriteContext {
            gateway,
            orchestrator: orchestrator.clone(),
            history: history.clone(),
        }));

        info!(
            generation_timeout_secs = config.generation_timeout.as_secs(),
            mailbox_capacity = config.mailbox_capacity,
            "Try-on system started"
        );

        Self {
            orchestrator,
            history,
            favorites,
            handles: vec![favorites_handle, orchestrator_handle, history_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the mailboxes. A component finishes any
    /// gateway call still in flight before its task exits, and the synchronizer
    /// holds clones of the other two clients, so it is awaited first.
    pub async fn shutdown(self) -> Result<(), FrameworkError> {
        info!("Shutting down try-on system...");

        drop(self.orchestrator);
        drop(self.history);
        drop(self.favorites);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Component task failed: {:?}", e);
                return Err(FrameworkError::TaskFailed(e.to_string()));
            }
        }

        info!("Try-on system shutdown complete.");
        Ok(())
    }
}
