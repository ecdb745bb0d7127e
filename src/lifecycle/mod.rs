//! Runtime orchestration and lifecycle management.
//!
//! - [`TryOnSystem`] - Starts, wires and stops every component
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod tracing;
pub mod tryon_system;

pub use self::tracing::*;
pub use tryon_system::*;
