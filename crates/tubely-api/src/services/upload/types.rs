//! Types used by the upload pipeline

use std::sync::Arc;

use bytes::Bytes;
use tubely_core::{AssetClassConfig, AssetSlot, MediaValidator};
use tubely_storage::{key_deriver_for, KeyDeriver, Storage};

use crate::constants::{THUMBNAIL_FORM_FIELD, VIDEO_FORM_FIELD};

/// File part pulled out of a multipart body
pub struct ExtractedFile {
    pub data: Bytes,
    pub filename: String,
    /// Declared media type; empty when the part carried none
    pub content_type: String,
}

/// Everything that distinguishes one kind of upload from another.
#[derive(Clone)]
pub struct AssetClass {
    /// Name used in logs and error messages
    pub name: &'static str,
    /// Multipart field the file is expected in
    pub form_field: &'static str,
    pub slot: AssetSlot,
    pub validator: MediaValidator,
    pub key_deriver: Arc<dyn KeyDeriver>,
    pub storage: Arc<dyn Storage>,
}

impl AssetClass {
    pub fn thumbnail(config: &AssetClassConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            name: "thumbnail",
            form_field: THUMBNAIL_FORM_FIELD,
            slot: AssetSlot::Thumbnail,
            validator: MediaValidator::new(config.policy()),
            key_deriver: key_deriver_for(config.key_strategy),
            storage,
        }
    }

    pub fn video(config: &AssetClassConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            name: "video",
            form_field: VIDEO_FORM_FIELD,
            slot: AssetSlot::Video,
            validator: MediaValidator::new(config.policy()),
            key_deriver: key_deriver_for(config.key_strategy),
            storage,
        }
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.validator.max_size_bytes()
    }
}
