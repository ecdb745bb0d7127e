//! Generation orchestrator: selection, generation lifecycle and the current result.
//!
//! ```text
//! idle ──generate()──▶ generating ──▶ completed
//!                           │
//!                           └───────▶ failed
//! completed / failed ──generate()──▶ generating
//! any ──clear_result() / reset()──▶ idle
//! ```

pub mod actor;
pub mod error;
pub mod messages;

pub use actor::Orchestrator;
pub use error::*;
pub use messages::*;

use crate::clients::OrchestratorClient;
use crate::config::StudioConfig;
use crate::framework::ActorRunner;

/// Creates a new orchestrator runner and its client.
pub fn new(config: &StudioConfig) -> (ActorRunner<Orchestrator>, OrchestratorClient) {
    let (runner, address) = ActorRunner::new(
        Orchestrator::new(config.generation_timeout),
        config.mailbox_capacity,
    );
    (runner, OrchestratorClient::new(address))
}
