//! # tubely-api
//!
//! HTTP API layer for Tubely built on Axum.
//!
//! Provides the thumbnail upload endpoint, static asset serving, the health
//! check, middleware (CORS, request logging), extractors and error mapping.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
