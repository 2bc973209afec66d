//! Application builder: wires router, middleware and state into an Axum app
//! and runs the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tubely_auth::jwt::decoder::JwtDecoder;
use tubely_core::config::AppConfig;
use tubely_core::error::AppError;
use tubely_database::store::build_video_store;
use tubely_service::thumbnail::ThumbnailService;
use tubely_storage::materializer::build_materializer;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the shared state: video store, materializer, token decoder and
/// thumbnail service.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let store = build_video_store(&config.database).await?;
    let materializer = build_materializer(&config.server, &config.storage).await?;

    let thumbnail_service = Arc::new(ThumbnailService::new(
        store,
        materializer,
        config.storage.max_upload_bytes,
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    Ok(AppState {
        config: Arc::new(config),
        jwt_decoder,
        thumbnail_service,
    })
}

/// Runs the Tubely server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Tubely server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            tubely_core::error::ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        )
    })?;

    info!("Tubely server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.changed().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out, exiting");
        }
    }

    info!("Tubely server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
