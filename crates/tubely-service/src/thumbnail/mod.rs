//! Thumbnail upload use case.

pub mod service;

pub use service::ThumbnailService;
