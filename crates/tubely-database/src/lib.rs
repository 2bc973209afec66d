//! # tubely-database
//!
//! Video metadata stores for Tubely: a PostgreSQL repository backed by an
//! sqlx pool, and a process-local store used by tests and the `memory`
//! provider.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryVideoStore, VideoRepository};
pub use store::{VideoStore, build_video_store};
