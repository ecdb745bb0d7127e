//! Type-safe wrappers around component [`Address`](crate::framework::Address)es.

pub mod favorite_client;
pub mod history_client;
pub mod orchestrator_client;

pub use favorite_client::*;
pub use history_client::*;
pub use orchestrator_client::*;
