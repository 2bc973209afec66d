//! Thumbnail materialization strategies.

pub mod disk;
pub mod inline;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use tubely_core::config::{ServerConfig, StorageConfig, ThumbnailStrategy};
use tubely_core::result::AppResult;

pub use disk::DiskMaterializer;
pub use inline::InlineMaterializer;

/// An uploaded image, held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Raw image bytes as received.
    pub data: Bytes,
    /// Content type declared on the multipart field.
    pub content_type: String,
    /// Client-supplied file name, for logging only.
    pub file_name: Option<String>,
}

impl ImageUpload {
    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Produces a storage reference for an uploaded thumbnail.
///
/// Implementations must not return a reference unless the image is fully
/// stored.
#[async_trait]
pub trait ThumbnailMaterializer: Send + Sync + std::fmt::Debug + 'static {
    /// Which strategy this materializer implements.
    fn strategy(&self) -> ThumbnailStrategy;

    /// Store `upload` and return the reference to write into video `video_id`.
    async fn materialize(&self, video_id: Uuid, upload: &ImageUpload) -> AppResult<String>;
}

/// Builds the materializer selected by `storage.strategy`.
pub async fn build_materializer(
    server: &ServerConfig,
    storage: &StorageConfig,
) -> AppResult<Arc<dyn ThumbnailMaterializer>> {
    let materializer: Arc<dyn ThumbnailMaterializer> = match storage.strategy {
        ThumbnailStrategy::Disk => Arc::new(
            DiskMaterializer::new(&storage.assets_root, server.assets_base_url()).await?,
        ),
        ThumbnailStrategy::Inline => Arc::new(InlineMaterializer::new()),
    };

    tracing::info!(strategy = ?materializer.strategy(), "Thumbnail materializer ready");
    Ok(materializer)
}
