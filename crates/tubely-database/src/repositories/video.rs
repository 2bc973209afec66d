//! PostgreSQL video repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tubely_core::error::{AppError, ErrorKind};
use tubely_core::result::AppResult;
use tubely_core::traits::Repository;
use tubely_entity::video::Video;

/// Repository for video records stored in PostgreSQL.
#[derive(Debug, Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    /// Create a new video repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Video, Uuid> for VideoRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Video>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to find video", e))
    }

    async fn create(&self, video: &Video) -> AppResult<Video> {
        sqlx::query_as::<_, Video>(
            "INSERT INTO videos (id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create video", e))
    }

    async fn update(&self, video: &Video) -> AppResult<Video> {
        sqlx::query_as::<_, Video>(
            "UPDATE videos SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to update video", e))?
        .ok_or_else(|| AppError::not_found(format!("Video {} no longer exists", video.id)))
    }
}
