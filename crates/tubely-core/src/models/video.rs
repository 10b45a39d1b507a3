use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Which URL field of a [`Video`] an uploaded asset is recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSlot {
    Thumbnail,
    Video,
}

impl Display for AssetSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetSlot::Thumbnail => write!(f, "thumbnail"),
            AssetSlot::Video => write!(f, "video"),
        }
    }
}

/// Video metadata record.
///
/// Records are created elsewhere; uploads only ever replace one of the URL
/// fields and bump `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn new(user_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: description.into(),
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn asset_url(&self, slot: AssetSlot) -> Option<&str> {
        match slot {
            AssetSlot::Thumbnail => self.thumbnail_url.as_deref(),
            AssetSlot::Video => self.video_url.as_deref(),
        }
    }

    /// Point the slot at a new asset and bump `updated_at`.
    pub fn set_asset_url(&mut self, slot: AssetSlot, url: String) {
        match slot {
            AssetSlot::Thumbnail => self.thumbnail_url = Some(url),
            AssetSlot::Video => self.video_url = Some(url),
        }
        self.updated_at = Utc::now();
    }
}
