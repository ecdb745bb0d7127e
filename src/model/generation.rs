//! A generated try-on composite and the metadata that came with it.
//!
//! Field names follow the storefront backend's JSON (`result_url`,
//! `product_name`, ...) through serde renames, so the same type is used on the
//! wire and inside the components.

use crate::model::{GarmentId, GenerationId, ModelId};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(alias = "_id")]
    pub id: GenerationId,
    #[serde(rename = "result_url")]
    pub result_image_ref: String,
    #[serde(rename = "model_image_url", default)]
    pub source_model_image_ref: String,
    #[serde(rename = "product_image_url", default)]
    pub source_garment_image_ref: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(rename = "product_name", default)]
    pub garment_name: String,
    #[serde(default)]
    pub model_id: Option<ModelId>,
    #[serde(rename = "product_id", default)]
    pub garment_id: Option<GarmentId>,
    #[serde(default)]
    pub processing_time_ms: u64,
    pub status: GenerationStatus,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A persisted past generation. Same shape as a live result.
pub type HistoryEntry = GenerationResult;

impl GenerationResult {
    /// Creates a completed result with empty display metadata.
    pub fn completed(id: impl Into<GenerationId>, result_image_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result_image_ref: result_image_ref.into(),
            source_model_image_ref: String::new(),
            source_garment_image_ref: String::new(),
            model_name: String::new(),
            garment_name: String::new(),
            model_id: None,
            garment_id: None,
            processing_time_ms: 0,
            status: GenerationStatus::Completed,
            is_favorite: false,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GenerationStatus::Completed
    }

    /// The generated image, only trusted once the generation completed.
    pub fn result_image(&self) -> Option<&str> {
        if self.is_completed() && !self.result_image_ref.trim().is_empty() {
            Some(&self.result_image_ref)
        } else {
            None
        }
    }

    /// Before/after pair of input images, only trusted once the generation completed.
    pub fn source_images(&self) -> Option<(&str, &str)> {
        self.is_completed().then(|| {
            (
                self.source_model_image_ref.as_str(),
                self.source_garment_image_ref.as_str(),
            )
        })
    }
}

/// Outcome of a multi-garment try-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: String,
    pub individual_results: Vec<GenerationResult>,
    #[serde(default)]
    pub combined_result: Option<GenerationResult>,
    #[serde(default)]
    pub total_processing_time_ms: u64,
    #[serde(default)]
    pub product_count: u32,
}

// Backend timestamps are ISO-8601, sometimes without an offset; those are UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_decodes_backend_session() {
        let json = r#"{
            "_id": "t1",
            "user_id": "u1",
            "model_id": "m1",
            "product_id": "g1",
            "result_url": "https://cdn.example/t1.png",
            "model_name": "Ava",
            "product_name": "Linen Shirt",
            "model_image_url": "https://cdn.example/m1.png",
            "product_image_url": "https://cdn.example/g1.png",
            "status": "completed",
            "processing_time_ms": 8400,
            "is_favorite": false,
            "ai_provider": "gemini",
            "created_at": "2025-03-01T10:15:30.123456",
            "expires_at": null
        }"#;

        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.id, GenerationId::from("t1"));
        assert_eq!(result.status, GenerationStatus::Completed);
        assert_eq!(result.processing_time_ms, 8400);
        assert_eq!(result.garment_name, "Linen Shirt");
        assert_eq!(result.garment_id, Some(GarmentId::from("g1")));
        assert_eq!(result.created_at.year(), 2025);
        assert_eq!(result.created_at.hour(), 10);
        assert!(result.expires_at.is_none());
        assert_eq!(result.result_image(), Some("https://cdn.example/t1.png"));
    }

    #[test]
    fn test_accepts_plain_id_and_offset_timestamps() {
        let json = r#"{
            "id": "t2",
            "result_url": "x.png",
            "status": "processing",
            "created_at": "2025-03-01T10:15:30+02:00"
        }"#;

        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.id.as_str(), "t2");
        assert_eq!(result.created_at.hour(), 8);
        assert!(!result.is_favorite);
    }

    #[test]
    fn test_image_fields_untrusted_unless_completed() {
        let mut result = GenerationResult::completed("t3", "x.png");
        assert!(result.source_images().is_some());

        result.status = GenerationStatus::Failed;
        assert_eq!(result.result_image(), None);
        assert_eq!(result.source_images(), None);
    }

    #[test]
    fn test_rejects_garbage_timestamp() {
        let json = r#"{"id": "t4", "result_url": "", "status": "failed", "created_at": "yesterday"}"#;
        assert!(serde_json::from_str::<GenerationResult>(json).is_err());
    }
}
