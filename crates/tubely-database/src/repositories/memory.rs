//! In-memory video store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tubely_core::error::AppError;
use tubely_core::result::AppResult;
use tubely_core::traits::Repository;
use tubely_entity::video::Video;

/// Process-local video store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryVideoStore {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl MemoryVideoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored videos.
    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl Repository<Video, Uuid> for MemoryVideoStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Video>> {
        Ok(self.videos.read().await.get(id).cloned())
    }

    async fn create(&self, video: &Video) -> AppResult<Video> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::internal(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }

    async fn update(&self, video: &Video) -> AppResult<Video> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::not_found(format!("Video {} no longer exists", video.id)))?;

        *stored = Video {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..video.clone()
        };
        Ok(stored.clone())
    }
}
