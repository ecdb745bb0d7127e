#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use tryon_studio::config::StudioConfig;
use tryon_studio::gateway::{GatewayError, MockGateway};
use tryon_studio::lifecycle::TryOnSystem;
use tryon_studio::model::{GenerationResult, HistoryPage, HISTORY_PAGE_SIZE};

/// Typical backend latency for one generation.
pub const GENERATION_LATENCY: Duration = Duration::from_secs(9);

pub fn system(mock: &MockGateway) -> TryOnSystem {
    TryOnSystem::new(Arc::new(mock.clone()), &StudioConfig::default())
}

pub fn completed(id: &str) -> GenerationResult {
    let mut result = GenerationResult::completed(id, format!("https://cdn.example/{id}.png"));
    result.model_id = Some("m1".into());
    result.garment_id = Some("g1".into());
    result.processing_time_ms = 8400;
    result
}

pub fn favorited(id: &str, is_favorite: bool) -> GenerationResult {
    let mut result = completed(id);
    result.is_favorite = is_favorite;
    result
}

pub fn page(page_number: u32, total_count: u64, ids: &[&str]) -> HistoryPage {
    HistoryPage {
        entries: ids.iter().map(|id| completed(id)).collect(),
        total_count,
        page_number,
        page_size: HISTORY_PAGE_SIZE,
    }
}

pub fn rejected(status: u16, detail: &str) -> GatewayError {
    GatewayError::Rejected {
        status,
        detail: detail.to_string(),
    }
}

/// Lets spawned tasks run until they block on the (paused) clock.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
