//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tubely_auth::jwt::decoder::JwtDecoder;
use tubely_core::config::AppConfig;
use tubely_service::thumbnail::ThumbnailService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Thumbnail upload service
    pub thumbnail_service: Arc<ThumbnailService>,
}
