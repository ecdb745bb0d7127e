//! # Try-On Studio demo
//!
//! Runs one generation against the configured backend, favorites the result,
//! and prints the first history page.
//!
//! ```bash
//! TRYON_API_URL=http://localhost:8000/api/v1 \
//! TRYON_API_TOKEN=... \
//! TRYON_MODEL_ID=m1 TRYON_GARMENT_ID=g1 \
//! RUST_LOG=info cargo run
//! ```

use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use tryon_studio::config::StudioConfig;
use tryon_studio::gateway::HttpGateway;
use tryon_studio::lifecycle::{setup_tracing, TryOnSystem};
use tryon_studio::model::{GarmentId, ModelId};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StudioConfig::from_env()?;
    setup_tracing();

    let model_id = std::env::var("TRYON_MODEL_ID").context("TRYON_MODEL_ID must be set")?;
    let garment_id = std::env::var("TRYON_GARMENT_ID").context("TRYON_GARMENT_ID must be set")?;

    info!(api = %config.api_base_url, "Starting try-on studio");
    let gateway = Arc::new(HttpGateway::from_config(&config));
    let system = TryOnSystem::new(gateway, &config);

    let span = tracing::info_span!("tryon");
    let generated = async {
        system.orchestrator.set_model(ModelId::new(model_id)).await?;
        system.orchestrator.set_garment(GarmentId::new(garment_id)).await?;
        system.orchestrator.generate().await
    }
    .instrument(span)
    .await;

    match generated {
        Ok(result) => {
            info!(id = %result.id, image = %result.result_image_ref, ms = result.processing_time_ms, "Try-on ready");
            match system.favorites.toggle_favorite(result.id.clone(), true).await {
                Ok(update) => info!(is_favorite = update.generation.is_favorite, "Saved to favorites"),
                Err(e) => warn!(error = %e, "Could not save favorite"),
            }
        }
        Err(e) if e.kind().is_remote_failure() => warn!(error = %e, "Try-on service failed"),
        Err(e) => warn!(error = %e, kind = %e.kind(), "Try-on not generated"),
    }

    match system.history.fetch_history(1).await {
        Ok(page) => {
            info!(total = page.total_count, pages = page.total_pages(), "History page 1");
            for entry in &page.entries {
                info!(id = %entry.id, garment = %entry.garment_name, favorite = entry.is_favorite, "History entry");
            }
        }
        Err(e) => warn!(error = %e, "Could not load history"),
    }

    system.shutdown().await?;
    Ok(())
}
