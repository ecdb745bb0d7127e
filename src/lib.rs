//! # Try-On Studio
//!
//! > **Orchestration core for a virtual clothing try-on storefront.**
//!
//! A customer picks a fashion model and a garment, asks a remote AI service for
//! a composite image of the garment on the model, then favorites and browses
//! past results. This crate holds the state machine behind that flow. Pages,
//! routing, authentication and the image service itself live elsewhere.
//!
//! ## 🏗️ Design
//!
//! Every component is an actor: it owns its state, runs on its own tokio task,
//! and processes its mailbox one message at a time. Callers only see
//! consistent snapshots, never partial writes.
//!
//! Remote calls take seconds, so components never await them inside their
//! mailbox loop. The call runs on a detached task and its completion is posted
//! back as a message. While a generation is in flight, `reset()` or
//! `is_generating()` still answer immediately.
//!
//! ### Stale responses
//! Each generation and history fetch carries a monotonically increasing request
//! token. Only the response for the latest token is applied; earlier callers
//! get `Abandoned` / `Superseded`. A late response can therefore never
//! resurrect a result after `clear_result()` or `reset()`.
//!
//! ### Confirmed writes
//! Favorites are never flipped optimistically. The synchronizer waits for the
//! service to confirm the write, then copies the confirmed flag into the
//! orchestrator's current result and the history page.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Mailbox runner, typed addresses and background-completion plumbing.
//! - **Key items**: [`Actor`](framework::Actor), [`ActorRunner`](framework::ActorRunner),
//!   [`ComponentClient`](framework::ComponentClient).
//!
//! ### 2. The Components ([`orchestrator`], [`history`], [`favorites`])
//! - [`Orchestrator`](orchestrator::Orchestrator): selection, generation lifecycle, current result.
//! - [`HistoryStore`](history::HistoryStore): one page of past generations.
//! - [`FavoriteSynchronizer`](favorites::FavoriteSynchronizer): one write, every copy updated.
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: Typed wrappers that hide message passing and map plumbing errors
//!   into each component's error enum.
//! - **Key items**: [`OrchestratorClient`](clients::OrchestratorClient),
//!   [`HistoryClient`](clients::HistoryClient), [`FavoriteClient`](clients::FavoriteClient).
//!
//! ### 4. The Boundary ([`gateway`])
//! - [`TryOnGateway`](gateway::TryOnGateway) trait, the reqwest-based
//!   [`HttpGateway`](gateway::HttpGateway) and a scripted
//!   [`MockGateway`](gateway::MockGateway) for tests.
//!
//! ### 5. Wiring ([`lifecycle`], [`config`])
//! - [`TryOnSystem`](lifecycle::TryOnSystem) starts and stops everything.
//! - [`StudioConfig`](config::StudioConfig) reads `TRYON_*` environment variables.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo against a local backend
//! TRYON_MODEL_ID=m1 TRYON_GARMENT_ID=g1 RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod favorites;
pub mod framework;
pub mod gateway;
pub mod history;
pub mod lifecycle;
pub mod model;
pub mod orchestrator;
