//! Inline `data:` URL materializer.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use tubely_core::config::ThumbnailStrategy;
use tubely_core::error::AppError;
use tubely_core::result::AppResult;

use super::{ImageUpload, ThumbnailMaterializer};
use crate::media_type;

/// Embeds the whole image in the record as
/// `data:<content-type>;base64,<payload>`.
///
/// Holds the payload in memory twice (raw and encoded).
#[derive(Debug, Clone, Default)]
pub struct InlineMaterializer;

impl InlineMaterializer {
    /// Create a new inline materializer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ThumbnailMaterializer for InlineMaterializer {
    fn strategy(&self) -> ThumbnailStrategy {
        ThumbnailStrategy::Inline
    }

    async fn materialize(&self, video_id: Uuid, upload: &ImageUpload) -> AppResult<String> {
        let content_type = media_type::essence(&upload.content_type).ok_or_else(|| {
            AppError::unsupported_media_type(format!(
                "Invalid content type '{}'",
                upload.content_type
            ))
        })?;

        let encoded = STANDARD.encode(&upload.data);
        tracing::debug!(%video_id, bytes = upload.len(), encoded = encoded.len(), "Encoded inline thumbnail");

        Ok(format!("data:{content_type};base64,{encoded}"))
    }
}
