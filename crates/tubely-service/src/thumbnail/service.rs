//! Thumbnail service: ownership check, materialization, metadata update.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use tubely_core::error::{AppError, ErrorKind};
use tubely_core::result::AppResult;
use tubely_database::store::VideoStore;
use tubely_entity::video::Video;
use tubely_storage::materializer::{ImageUpload, ThumbnailMaterializer};

use crate::context::RequestContext;

/// Attaches uploaded thumbnails to videos owned by the requester.
#[derive(Clone)]
pub struct ThumbnailService {
    /// Video metadata store.
    store: VideoStore,
    /// Strategy producing the stored reference.
    materializer: Arc<dyn ThumbnailMaterializer>,
    /// Upper bound on the payload size.
    max_upload_bytes: u64,
}

impl std::fmt::Debug for ThumbnailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailService")
            .field("strategy", &self.materializer.strategy())
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl ThumbnailService {
    /// Creates a new thumbnail service.
    pub fn new(
        store: VideoStore,
        materializer: Arc<dyn ThumbnailMaterializer>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            store,
            materializer,
            max_upload_bytes,
        }
    }

    /// The configured payload bound in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Stores `upload` as the thumbnail of `video_id` and returns the
    /// updated video.
    ///
    /// The record is only written once the requester is confirmed as the
    /// owner and the image has been fully materialized.
    pub async fn upload_thumbnail(
        &self,
        ctx: &RequestContext,
        video_id: Uuid,
        upload: ImageUpload,
    ) -> AppResult<Video> {
        info!(
            video_id = %video_id,
            user_id = %ctx.user_id,
            ip = %ctx.ip_address,
            user_agent = ctx.user_agent.as_deref().unwrap_or("-"),
            content_type = %upload.content_type,
            size = upload.len(),
            "Uploading thumbnail"
        );

        if upload.len() as u64 > self.max_upload_bytes {
            return Err(AppError::payload_too_large(format!(
                "Thumbnail exceeds maximum upload size of {} bytes",
                self.max_upload_bytes
            )));
        }

        let mut video = self.find_owned_video(ctx, video_id).await?;

        let reference = self.materializer.materialize(video.id, &upload).await?;
        video.thumbnail_url = Some(reference);

        let updated = self.store.update(&video).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistFailure,
                format!("Couldn't update video {video_id}"),
                e,
            )
        })?;

        info!(
            video_id = %updated.id,
            user_id = %ctx.user_id,
            strategy = ?self.materializer.strategy(),
            elapsed_ms = (Utc::now() - ctx.request_time).num_milliseconds(),
            "Thumbnail uploaded"
        );
        Ok(updated)
    }

    /// Loads the video and verifies the requester owns it.
    async fn find_owned_video(&self, ctx: &RequestContext, video_id: Uuid) -> AppResult<Video> {
        let video = self
            .store
            .find_by_id(&video_id)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::LookupFailure,
                    format!("Couldn't find video {video_id}"),
                    e,
                )
            })?
            .filter(|v| !v.is_nil())
            .ok_or_else(|| AppError::not_found(format!("Video {video_id} not found")))?;

        if !video.is_owned_by(ctx.user_id) {
            warn!(
                video_id = %video_id,
                owner_id = %video.user_id,
                user_id = %ctx.user_id,
                ip = %ctx.ip_address,
                user_agent = ctx.user_agent.as_deref().unwrap_or("-"),
                "Thumbnail upload rejected: requester is not the owner"
            );
            return Err(AppError::forbidden("Not authorized to update this video"));
        }

        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;
    use tempfile::TempDir;

    use tubely_core::traits::Repository;
    use tubely_database::MemoryVideoStore;
    use tubely_entity::video::CreateVideo;
    use tubely_storage::materializer::{DiskMaterializer, InlineMaterializer};

    use super::*;

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    /// Memory store that counts `update` calls and can be told to fail.
    ///
    /// When `found` is set, every lookup returns that record instead.
    #[derive(Debug, Default)]
    struct CountingStore {
        inner: MemoryVideoStore,
        updates: AtomicUsize,
        fail_find: bool,
        fail_update: bool,
        found: Option<Video>,
    }

    #[async_trait]
    impl Repository<Video, Uuid> for CountingStore {
        async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Video>> {
            if self.fail_find {
                return Err(AppError::internal("connection reset"));
            }
            if let Some(video) = &self.found {
                return Ok(Some(video.clone()));
            }
            self.inner.find_by_id(id).await
        }

        async fn create(&self, video: &Video) -> AppResult<Video> {
            self.inner.create(video).await
        }

        async fn update(&self, video: &Video) -> AppResult<Video> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.fail_update {
                return Err(AppError::internal("connection reset"));
            }
            self.inner.update(video).await
        }
    }

    struct Fixture {
        store: Arc<CountingStore>,
        service: ThumbnailService,
        assets: TempDir,
        owner: Uuid,
        video: Video,
    }

    async fn fixture_with(store: CountingStore, max_upload_bytes: u64) -> Fixture {
        let assets = TempDir::new().expect("tempdir");
        let store = Arc::new(store);
        let owner = Uuid::new_v4();
        let video = store
            .create(&Video::new(CreateVideo {
                user_id: owner,
                title: "Boot.dev intro".to_string(),
                description: String::new(),
            }))
            .await
            .expect("seed video");

        let materializer = DiskMaterializer::new(assets.path(), "http://localhost:8091/assets")
            .await
            .expect("materializer");
        let service = ThumbnailService::new(store.clone(), Arc::new(materializer), max_upload_bytes);

        Fixture {
            store,
            service,
            assets,
            owner,
            video,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(CountingStore::default(), 10 << 20).await
    }

    fn jpeg() -> ImageUpload {
        ImageUpload {
            data: Bytes::from_static(JPEG_BYTES),
            content_type: "image/jpeg".to_string(),
            file_name: Some("thumb.jpg".to_string()),
        }
    }

    fn asset_count(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).expect("read assets").count()
    }

    #[tokio::test]
    async fn test_owner_upload_writes_file_and_updates_video() {
        let fx = fixture().await;
        let ctx = RequestContext::system(fx.owner);

        let updated = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, jpeg())
            .await
            .expect("upload");

        let url = updated.thumbnail_url.clone().expect("thumbnail url");
        let filename = url
            .strip_prefix("http://localhost:8091/assets/")
            .expect("asset url prefix");
        assert!(filename.ends_with(".jpg"));
        assert_eq!(filename.len(), 43 + ".jpg".len());

        let written = std::fs::read(fx.assets.path().join(filename)).expect("asset file");
        assert_eq!(written, JPEG_BYTES);

        let stored = fx.store.find_by_id(&fx.video.id).await.expect("find");
        assert_eq!(stored.and_then(|v| v.thumbnail_url), Some(url));
        assert_eq!(fx.store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_inline_upload_embeds_data_url() {
        let store = Arc::new(MemoryVideoStore::new());
        let owner = Uuid::new_v4();
        let video = store
            .create(&Video::new(CreateVideo {
                user_id: owner,
                title: "Inline".to_string(),
                description: String::new(),
            }))
            .await
            .expect("seed video");
        let service = ThumbnailService::new(store, Arc::new(InlineMaterializer::new()), 1024);

        let upload = ImageUpload {
            data: Bytes::from_static(b"\x89PNG"),
            content_type: "image/png".to_string(),
            file_name: None,
        };
        let updated = service
            .upload_thumbnail(&RequestContext::system(owner), video.id, upload)
            .await
            .expect("upload");

        assert_eq!(
            updated.thumbnail_url.as_deref(),
            Some("data:image/png;base64,iVBORw==")
        );
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_and_nothing_changes() {
        let fx = fixture().await;
        let ctx = RequestContext::system(Uuid::new_v4());

        let err = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, jpeg())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(asset_count(&fx.assets), 0);
        assert_eq!(fx.store.updates.load(Ordering::SeqCst), 0);
        let stored = fx.store.find_by_id(&fx.video.id).await.expect("find");
        assert_eq!(stored, Some(fx.video.clone()));
    }

    #[tokio::test]
    async fn test_unknown_video_is_not_found_before_any_io() {
        let fx = fixture().await;
        let ctx = RequestContext::system(fx.owner);

        let err = fx
            .service
            .upload_thumbnail(&ctx, Uuid::new_v4(), jpeg())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(asset_count(&fx.assets), 0);
    }

    #[tokio::test]
    async fn test_nil_id_record_is_not_found() {
        let assets = TempDir::new().expect("tempdir");
        let owner = Uuid::new_v4();
        let requested = Uuid::new_v4();
        let mut nil_video = Video::new(CreateVideo {
            user_id: owner,
            title: "Zeroed".to_string(),
            description: String::new(),
        });
        nil_video.id = Uuid::nil();

        let store = Arc::new(CountingStore {
            found: Some(nil_video),
            ..CountingStore::default()
        });
        let materializer = DiskMaterializer::new(assets.path(), "http://localhost:8091/assets")
            .await
            .expect("materializer");
        let service = ThumbnailService::new(store.clone(), Arc::new(materializer), 1024);

        let err = service
            .upload_thumbnail(&RequestContext::system(owner), requested, jpeg())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(asset_count(&assets), 0);
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upload_with_client_context() {
        let fx = fixture().await;
        let ctx = RequestContext::new(
            fx.owner,
            "203.0.113.7".to_string(),
            Some("curl/8.5.0".to_string()),
        );
        assert!(ctx.request_time <= Utc::now());

        let updated = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, jpeg())
            .await
            .expect("upload");

        assert!(updated.thumbnail_url.is_some());
        assert_eq!(asset_count(&fx.assets), 1);
    }

    #[tokio::test]
    async fn test_oversized_payload_rejected() {
        let fx = fixture_with(CountingStore::default(), 4).await;
        let ctx = RequestContext::system(fx.owner);

        let err = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, jpeg())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::PayloadTooLarge);
        assert_eq!(asset_count(&fx.assets), 0);
        assert_eq!(fx.store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_media_type_writes_nothing() {
        let fx = fixture().await;
        let ctx = RequestContext::system(fx.owner);
        let upload = ImageUpload {
            content_type: "application/x-unknown-thing".to_string(),
            ..jpeg()
        };

        let err = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, upload)
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::UnsupportedMediaType);
        assert_eq!(asset_count(&fx.assets), 0);
        assert_eq!(fx.store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_lookup_failure() {
        let store = CountingStore {
            fail_find: true,
            ..CountingStore::default()
        };
        let fx = fixture_with(store, 1024).await;

        let err = fx
            .service
            .upload_thumbnail(&RequestContext::system(fx.owner), fx.video.id, jpeg())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::LookupFailure);
        assert_eq!(asset_count(&fx.assets), 0);
    }

    #[tokio::test]
    async fn test_store_update_failure_is_persist_failure() {
        let store = CountingStore {
            fail_update: true,
            ..CountingStore::default()
        };
        let fx = fixture_with(store, 1024).await;

        let err = fx
            .service
            .upload_thumbnail(&RequestContext::system(fx.owner), fx.video.id, jpeg())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::PersistFailure);
        assert_eq!(fx.store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeat_upload_replaces_reference() {
        let fx = fixture().await;
        let ctx = RequestContext::system(fx.owner);

        let first = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, jpeg())
            .await
            .expect("first upload");
        let second = fx
            .service
            .upload_thumbnail(&ctx, fx.video.id, jpeg())
            .await
            .expect("second upload");

        assert_ne!(first.thumbnail_url, second.thumbnail_url);
        assert_eq!(asset_count(&fx.assets), 2);
    }
}
