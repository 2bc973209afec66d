//! Tubely Server
//!
//! Main entry point that loads configuration and starts the thumbnail
//! service.

use tracing_subscriber::{EnvFilter, fmt};

use tubely_core::config::AppConfig;
use tubely_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
///
/// `TUBELY_CONFIG` selects an explicit file; otherwise `TUBELY_ENV` picks the
/// overlay merged over `config/default.toml`.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("TUBELY_CONFIG") {
        Ok(path) => AppConfig::load_file(&path),
        Err(_) => {
            let env = std::env::var("TUBELY_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        strategy = ?config.storage.strategy,
        database = ?config.database.provider,
        "Starting Tubely"
    );

    tubely_api::run_server(config).await
}
