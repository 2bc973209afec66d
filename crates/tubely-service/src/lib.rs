//! # tubely-service
//!
//! Business logic service layer for Tubely. Services orchestrate the video
//! store and the thumbnail materializer to implement application-level use
//! cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod thumbnail;

pub use context::RequestContext;
pub use thumbnail::ThumbnailService;
