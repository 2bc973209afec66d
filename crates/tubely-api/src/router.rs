//! Route definitions for the Tubely HTTP API.
//!
//! API routes are mounted under `/api`; stored thumbnails are served from
//! `/assets`. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_bytes).unwrap_or(usize::MAX);
    let assets = ServeDir::new(&state.config.storage.assets_root);

    let api_routes = Router::new()
        .merge(thumbnail_routes(max_upload))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/assets", assets)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Thumbnail upload, with the request body capped at `max_upload` bytes.
fn thumbnail_routes(max_upload: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/thumbnail_upload/{video_id}",
            post(handlers::thumbnail::upload_thumbnail),
        )
        .layer(DefaultBodyLimit::max(max_upload))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/healthz", get(handlers::health::healthz))
}
