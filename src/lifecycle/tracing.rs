//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); every
//! component runner logs with an `actor` field instead.
//!
//! ## What Gets Traced
//!
//! - **Component lifecycle**: `Actor started` and `Shutdown` with the number of handled messages
//! - **Messages**: every mailbox message at `debug`
//! - **Client calls**: spans named after the client method (`generate`, `fetch_history`, ...)
//! - **Remote calls**: request line at `debug`, rejections at `warn`
//! - **Outcomes**: completed, failed and discarded generations with their request token
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and outcomes
//! RUST_LOG=info cargo run
//!
//! # Every message, including gateway completions and stale-response discards
//! RUST_LOG=debug cargo run
//!
//! # Only the orchestrator's own decisions
//! RUST_LOG=tryon_studio::orchestrator=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started actor="orchestrator"
//! INFO Actor started actor="history"
//! INFO Actor started actor="favorites"
//! INFO generate: Generation started token=1 model_id=m1 garment_id=g1
//! INFO Generation completed token=1 id=t1 ms=8400
//! INFO toggle_favorite: Sending favorite toggle to actor id=GenerationId("t1") desired=true
//! INFO Favorite synchronized id=t1 is_favorite=true current_result_updated=true history_entry_updated=false
//! ```
//!
//! A second `generate()` issued while the first is still running shows up as a
//! `Discarding stale generation` line at `debug` once the older response arrives.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Components are identified by the `actor` field
        .compact()
        .init();
}
