//! History store: one page of past generations with confirmed-write favorites.
//!
//! Each fetch replaces the page wholesale. A failed fetch keeps the entries
//! that were already shown and records the error next to them.

pub mod actor;
pub mod error;
pub mod messages;

pub use actor::HistoryStore;
pub use error::*;
pub use messages::*;

use crate::clients::HistoryClient;
use crate::config::StudioConfig;
use crate::framework::ActorRunner;

/// Creates a new history runner and its client.
pub fn new(config: &StudioConfig) -> (ActorRunner<HistoryStore>, HistoryClient) {
    let (runner, address) = ActorRunner::new(
        HistoryStore::new(config.request_timeout),
        config.mailbox_capacity,
    );
    (runner, HistoryClient::new(address))
}
