//! Metadata store selection.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use tubely_core::config::{DatabaseConfig, DatabaseProvider};
use tubely_core::result::AppResult;
use tubely_core::traits::Repository;
use tubely_entity::video::Video;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{MemoryVideoStore, VideoRepository};

/// The video metadata store as seen by the services.
pub type VideoStore = Arc<dyn Repository<Video, Uuid>>;

/// Builds the store selected by `database.provider`.
///
/// The `postgres` provider connects and applies pending migrations.
pub async fn build_video_store(config: &DatabaseConfig) -> AppResult<VideoStore> {
    let store: VideoStore = match config.provider {
        DatabaseProvider::Memory => {
            warn!("Using in-memory video store: it starts empty, uploads will answer NOT_FOUND");
            Arc::new(MemoryVideoStore::new())
        }
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(config).await?.into_pool();
            run_migrations(&pool).await?;
            info!("Using PostgreSQL video store");
            Arc::new(VideoRepository::new(pool))
        }
    };

    Ok(store)
}
