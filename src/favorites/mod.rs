//! Favorite synchronizer: one confirmed write, reflected in every local copy.
//!
//! A second toggle for a generation whose write is still pending is rejected
//! with [`FavoriteError::AlreadyInFlight`] instead of issuing another call.

pub mod actor;
pub mod error;
pub mod messages;

pub use actor::{FavoriteContext, FavoriteSynchronizer};
pub use error::*;
pub use messages::*;

use crate::clients::FavoriteClient;
use crate::config::StudioConfig;
use crate::framework::ActorRunner;

/// Creates a new synchronizer runner and its client.
///
/// The orchestrator and history clients are injected later through
/// [`FavoriteContext`] when the runner starts.
pub fn new(config: &StudioConfig) -> (ActorRunner<FavoriteSynchronizer>, FavoriteClient) {
    let (runner, address) = ActorRunner::new(
        FavoriteSynchronizer::new(config.request_timeout),
        config.mailbox_capacity,
    );
    (runner, FavoriteClient::new(address))
}
