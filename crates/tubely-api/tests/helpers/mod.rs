//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use tubely_api::state::AppState;
use tubely_auth::JwtEncoder;
use tubely_auth::JwtDecoder;
use tubely_core::config::{AppConfig, ThumbnailStrategy};
use tubely_core::traits::Repository;
use tubely_database::MemoryVideoStore;
use tubely_entity::video::{CreateVideo, Video};
use tubely_service::ThumbnailService;
use tubely_storage::build_materializer;

pub const BOUNDARY: &str = "tubely-test-boundary";
pub const ASSETS_PREFIX: &str = "http://localhost:8091/assets/";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Video store shared with the router
    pub store: MemoryVideoStore,
    /// Application config
    pub config: AppConfig,
    /// Token issuer using the app's secret
    pub encoder: JwtEncoder,
    /// Asset root, removed on drop
    pub assets: TempDir,
}

impl TestApp {
    /// Create a new test application using the disk strategy.
    pub async fn new() -> Self {
        Self::with(ThumbnailStrategy::Disk, 10 << 20).await
    }

    /// Create a new test application with the given strategy and upload bound.
    pub async fn with(strategy: ThumbnailStrategy, max_upload_bytes: u64) -> Self {
        let assets = TempDir::new().expect("Failed to create asset dir");

        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.server.public_host = "localhost".to_string();
        config.server.port = 8091;
        config.storage.assets_root = assets.path().to_string_lossy().into_owned();
        config.storage.strategy = strategy;
        config.storage.max_upload_bytes = max_upload_bytes;

        let store = MemoryVideoStore::new();
        let materializer = build_materializer(&config.server, &config.storage)
            .await
            .expect("Failed to build materializer");

        let state = AppState {
            config: Arc::new(config.clone()),
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            thumbnail_service: Arc::new(ThumbnailService::new(
                Arc::new(store.clone()),
                materializer,
                max_upload_bytes,
            )),
        };

        Self {
            router: tubely_api::build_app(state),
            store,
            encoder: JwtEncoder::new(&config.auth),
            config,
            assets,
        }
    }

    /// Insert a video owned by `user_id`.
    pub async fn create_video(&self, user_id: Uuid) -> Video {
        self.store
            .create(&Video::new(CreateVideo {
                user_id,
                title: "Integration video".to_string(),
                description: String::new(),
            }))
            .await
            .expect("Failed to create video")
    }

    /// Fetch a video straight from the store.
    pub async fn video(&self, id: Uuid) -> Option<Video> {
        self.store.find_by_id(&id).await.expect("Failed to read video")
    }

    /// Issue an access token for `user_id`.
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.encoder
            .issue_access_token(user_id)
            .expect("Failed to issue token")
            .0
    }

    /// Number of files in the asset root.
    pub fn asset_count(&self) -> usize {
        std::fs::read_dir(self.assets.path())
            .expect("Failed to read asset dir")
            .count()
    }

    /// POST a thumbnail upload with the given multipart body.
    pub async fn upload(&self, video_id: &str, body: Vec<u8>, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(format!("/api/thumbnail_upload/{video_id}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    /// Send a request to the test app and collect the response.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            bytes: bytes.to_vec(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` if not JSON
    pub body: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
}

impl TestResponse {
    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Builds a multipart body with one file field.
pub fn multipart_file(field: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A small JPEG-looking payload.
pub fn jpeg_bytes() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0");
    data.extend(std::iter::repeat_n(0xAB, 64));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}
