//! Asset-file materializer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use tubely_core::config::ThumbnailStrategy;
use tubely_core::error::{AppError, ErrorKind};
use tubely_core::result::AppResult;

use super::{ImageUpload, ThumbnailMaterializer};
use crate::{media_type, token};

/// Writes thumbnails as files under the asset root and references them by
/// their public URL.
#[derive(Debug, Clone)]
pub struct DiskMaterializer {
    /// Directory receiving thumbnail files.
    root: PathBuf,
    /// Public URL prefix of `root`, without trailing slash.
    base_url: String,
}

impl DiskMaterializer {
    /// Create a materializer rooted at `root_path`, creating the directory
    /// if needed.
    pub async fn new(root_path: impl AsRef<Path>, base_url: impl Into<String>) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StorageWriteFailure,
                format!("Failed to create asset root: {}", root.display()),
                e,
            )
        })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { root, base_url })
    }

    /// The asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn write_contents(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
        file.write_all(data).await?;
        file.flush().await?;
        file.sync_all().await
    }

    fn write_error(filename: &str, source: std::io::Error) -> AppError {
        AppError::with_source(
            ErrorKind::StorageWriteFailure,
            format!("Could not write thumbnail file '{filename}'"),
            source,
        )
    }
}

#[async_trait]
impl ThumbnailMaterializer for DiskMaterializer {
    fn strategy(&self) -> ThumbnailStrategy {
        ThumbnailStrategy::Disk
    }

    async fn materialize(&self, video_id: Uuid, upload: &ImageUpload) -> AppResult<String> {
        let extension = media_type::extension_for(&upload.content_type).ok_or_else(|| {
            AppError::unsupported_media_type(format!(
                "Could not get file extension for content type '{}'",
                upload.content_type
            ))
        })?;

        let filename = format!("{}{}", token::random_file_token(), extension);
        let path = self.root.join(&filename);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| Self::write_error(&filename, e))?;

        if let Err(e) = Self::write_contents(&mut file, &upload.data).await {
            drop(file);
            // Never leave a truncated file behind.
            if let Err(cleanup) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %cleanup, "Failed to remove partial thumbnail");
            }
            return Err(Self::write_error(&filename, e));
        }
        drop(file);

        debug!(%video_id, path = %path.display(), bytes = upload.len(), "Wrote thumbnail");
        Ok(format!("{}/{}", self.base_url, filename))
    }
}
