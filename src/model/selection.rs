use crate::model::{GarmentId, ModelId, PhotoGenerationRequest, UserPhoto};
use serde::{Deserialize, Serialize};

/// Most garments a single batch try-on accepts.
pub const MAX_BATCH_GARMENTS: usize = 5;

/// The user's current picks for the next generation.
///
/// Owned by the orchestrator; other code only ever sees a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub model_id: Option<ModelId>,
    pub garment_id: Option<GarmentId>,
    /// Ordered multi-garment pick for batch try-ons.
    #[serde(default)]
    pub batch_garments: Vec<GarmentId>,
    /// Used instead of a catalog model while `model_id` is the user-upload id.
    #[serde(skip)]
    pub user_photo: Option<UserPhoto>,
}

/// Payload for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model_id: ModelId,
    #[serde(rename = "product_id")]
    pub garment_id: GarmentId,
}

/// Payload for one batch generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub model_id: ModelId,
    #[serde(rename = "product_ids")]
    pub garment_ids: Vec<GarmentId>,
}

/// A single generation, against a catalog model or an uploaded photo.
#[derive(Debug, Clone, PartialEq)]
pub enum TryOnRequest {
    Catalog(GenerationRequest),
    Photo(PhotoGenerationRequest),
}

impl TryOnRequest {
    pub fn garment_id(&self) -> &GarmentId {
        match self {
            TryOnRequest::Catalog(request) => &request.garment_id,
            TryOnRequest::Photo(request) => &request.garment_id,
        }
    }

    pub fn uses_photo(&self) -> bool {
        matches!(self, TryOnRequest::Photo(_))
    }
}

impl Selection {
    pub fn model(&self) -> Option<&ModelId> {
        self.model_id.as_ref().filter(|id| !id.is_blank())
    }

    pub fn garment(&self) -> Option<&GarmentId> {
        self.garment_id.as_ref().filter(|id| !id.is_blank())
    }

    /// The request to send, if a model (or an uploaded photo) and a garment are chosen.
    ///
    /// The user-upload model id without a photo counts as no model.
    pub fn try_on_request(&self) -> Option<TryOnRequest> {
        let model_id = self.model()?;
        let garment_id = self.garment()?.clone();
        if model_id.is_user_upload() {
            let photo = self.user_photo.clone()?;
            return Some(TryOnRequest::Photo(PhotoGenerationRequest { photo, garment_id }));
        }
        Some(TryOnRequest::Catalog(GenerationRequest {
            model_id: model_id.clone(),
            garment_id,
        }))
    }

    pub fn is_ready(&self) -> bool {
        self.try_on_request().is_some()
    }

    /// Uses the photo as the model for following generations.
    pub fn set_user_photo(&mut self, photo: UserPhoto) {
        self.user_photo = Some(photo);
        self.model_id = Some(ModelId::user_upload());
    }

    /// Drops the photo together with the model choice it stood for.
    pub fn clear_user_photo(&mut self) {
        self.user_photo = None;
        self.model_id = None;
    }

    /// Adds the garment to the batch pick, or removes it if already picked.
    ///
    /// Additions past [`MAX_BATCH_GARMENTS`] and blank ids are ignored. The
    /// single garment follows the pick: the first garment added becomes the
    /// selected garment, and after a removal it is the one garment left, or
    /// nothing.
    pub fn toggle_batch_garment(&mut self, garment_id: GarmentId) {
        if let Some(pos) = self.batch_garments.iter().position(|g| *g == garment_id) {
            self.batch_garments.remove(pos);
            self.garment_id = match self.batch_garments.as_slice() {
                [remaining] => Some(remaining.clone()),
                _ => None,
            };
        } else if !garment_id.is_blank() && self.batch_garments.len() < MAX_BATCH_GARMENTS {
            self.batch_garments.push(garment_id);
            if let [first] = self.batch_garments.as_slice() {
                self.garment_id = Some(first.clone());
            }
        }
    }

    /// Empties the batch pick and the garment it selected.
    pub fn clear_batch_garments(&mut self) {
        self.batch_garments.clear();
        self.garment_id = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_only_with_both_non_blank() {
        let mut selection = Selection::default();
        assert!(!selection.is_ready());

        selection.model_id = Some(ModelId::from("m1"));
        assert!(!selection.is_ready());

        selection.garment_id = Some(GarmentId::from(" "));
        assert!(!selection.is_ready());

        selection.garment_id = Some(GarmentId::from("g1"));
        let Some(TryOnRequest::Catalog(request)) = selection.try_on_request() else {
            panic!("Expected a catalog request");
        };
        assert_eq!(request.model_id.as_str(), "m1");
        assert_eq!(request.garment_id.as_str(), "g1");
    }

    #[test]
    fn test_user_upload_needs_a_photo() {
        let mut selection = Selection {
            model_id: Some(ModelId::user_upload()),
            garment_id: Some(GarmentId::from("g1")),
            ..Selection::default()
        };
        assert!(!selection.is_ready());

        let photo = UserPhoto::new("me.png", "image/png", vec![1u8; 8]).unwrap();
        selection.set_user_photo(photo.clone());
        let Some(TryOnRequest::Photo(request)) = selection.try_on_request() else {
            panic!("Expected a photo request");
        };
        assert_eq!(request.photo, photo);
        assert_eq!(request.garment_id.as_str(), "g1");

        // Picking a catalog model again ignores the photo.
        selection.model_id = Some(ModelId::from("m1"));
        assert!(matches!(selection.try_on_request(), Some(TryOnRequest::Catalog(_))));

        selection.clear_user_photo();
        assert_eq!(selection.user_photo, None);
        assert_eq!(selection.model_id, None);
    }

    #[test]
    fn test_batch_toggle_caps_and_removes() {
        let mut selection = Selection::default();
        for i in 0..7 {
            selection.toggle_batch_garment(GarmentId::new(format!("g{i}")));
        }
        assert_eq!(selection.batch_garments.len(), MAX_BATCH_GARMENTS);

        selection.toggle_batch_garment(GarmentId::from("g2"));
        assert_eq!(selection.batch_garments.len(), MAX_BATCH_GARMENTS - 1);
        assert!(!selection.batch_garments.contains(&GarmentId::from("g2")));
    }

    #[test]
    fn test_batch_pick_drives_single_garment() {
        let mut selection = Selection::default();

        selection.toggle_batch_garment(GarmentId::from("g1"));
        assert_eq!(selection.garment_id, Some(GarmentId::from("g1")));

        // Later additions keep the first pick.
        selection.toggle_batch_garment(GarmentId::from("g2"));
        assert_eq!(selection.garment_id, Some(GarmentId::from("g1")));

        // Down to one garment: that one is selected.
        selection.toggle_batch_garment(GarmentId::from("g1"));
        assert_eq!(selection.garment_id, Some(GarmentId::from("g2")));

        selection.toggle_batch_garment(GarmentId::from("g3"));
        selection.toggle_batch_garment(GarmentId::from("g4"));
        selection.toggle_batch_garment(GarmentId::from("g3"));
        assert_eq!(selection.garment_id, None);

        selection.garment_id = Some(GarmentId::from("g9"));
        selection.clear_batch_garments();
        assert!(selection.batch_garments.is_empty());
        assert_eq!(selection.garment_id, None);
    }

    #[test]
    fn test_request_wire_names() {
        let request = GenerationRequest {
            model_id: ModelId::from("m1"),
            garment_id: GarmentId::from("g1"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"model_id": "m1", "product_id": "g1"}));
    }
}
