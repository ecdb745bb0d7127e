//! Generic actor framework for try-on components.
//!
//! This module provides the building blocks every component is made of: a
//! mailbox-driven runner, typed addresses, and a way to run remote calls off the
//! mailbox loop while keeping all state changes inside it.
//!
//! # Main Components
//!
//! - [`Actor`] - Trait that components implement to be driven by a runner
//! - [`ActorRunner`] - Owns a component and processes its mailbox sequentially
//! - [`Address`] - Cloneable sending half used by clients
//! - [`ComponentClient`] - Shared request helpers for component-specific clients
//! - [`FrameworkError`] - Mailbox plumbing errors
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning components.

pub mod client;
pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use client::ComponentClient;
pub use self::core::*;
