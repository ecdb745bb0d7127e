//! A customer's own photo, used in place of a catalog model.

use crate::model::{GarmentId, ModelId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Model id the selection carries while an uploaded photo stands in for a model.
pub const USER_UPLOAD_MODEL: &str = "user_upload";

/// Largest photo the service accepts.
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_PHOTO_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("Invalid file type: {0}. Allowed: JPEG, PNG.")]
    UnsupportedType(String),

    #[error("File size ({size} bytes) exceeds maximum of {max} bytes", max = MAX_PHOTO_BYTES)]
    TooLarge { size: usize },

    #[error("Photo is empty")]
    Empty,
}

/// An uploaded photo, checked against the service's type and size limits.
///
/// The bytes are shared, so cloning a selection does not copy the image.
/// Resolution is only checked by the service.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPhoto {
    file_name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl UserPhoto {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, PhotoError> {
        let content_type = content_type.into().to_ascii_lowercase();
        if !ALLOWED_PHOTO_TYPES.contains(&content_type.as_str()) {
            return Err(PhotoError::UnsupportedType(content_type));
        }
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(PhotoError::Empty);
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(PhotoError::TooLarge { size: bytes.len() });
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keeps image bytes out of logs.
impl fmt::Debug for UserPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPhoto")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ModelId {
    pub fn user_upload() -> Self {
        Self::from(USER_UPLOAD_MODEL)
    }

    /// True when this id stands for an uploaded photo rather than a catalog model.
    pub fn is_user_upload(&self) -> bool {
        self.as_str() == USER_UPLOAD_MODEL
    }
}

/// Payload for a generation against an uploaded photo. Sent as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoGenerationRequest {
    pub photo: UserPhoto,
    pub garment_id: GarmentId,
}
