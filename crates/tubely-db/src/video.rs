//! Video repository: read and update of the `videos` table.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use tubely_core::models::{AssetSlot, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Metadata store operations needed by uploads
#[async_trait::async_trait]
pub trait VideoRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Point one asset slot of a video at `url` and bump `updated_at`,
    /// leaving the other slot as currently stored. Returns the record after
    /// the write. A record that no longer exists is reported as `NotFound`.
    async fn update_asset_url(
        &self,
        id: Uuid,
        slot: AssetSlot,
        url: &str,
    ) -> Result<Video, AppError>;
}

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at";

/// Column holding the URL for `slot`.
fn slot_column(slot: AssetSlot) -> &'static str {
    match slot {
        AssetSlot::Thumbnail => "thumbnail_url",
        AssetSlot::Video => "video_url",
    }
}

/// Row type for videos table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct VideoRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        Video {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            thumbnail_url: row.thumbnail_url,
            video_url: row.video_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL video repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);
        let row = sqlx::query_as::<Postgres, VideoRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Video::from))
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos", db.operation = "update", db.record_id = %id, slot = %slot))]
    async fn update_asset_url(
        &self,
        id: Uuid,
        slot: AssetSlot,
        url: &str,
    ) -> Result<Video, AppError> {
        // Only the slot's own column is written, so concurrent uploads to the
        // other slot of the same record are not overwritten.
        let query = format!(
            "UPDATE videos SET {} = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            slot_column(slot),
            VIDEO_COLUMNS
        );

        let row = sqlx::query_as::<Postgres, VideoRow>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Video::from)
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))
    }
}
