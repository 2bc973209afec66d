//! # tubely-storage
//!
//! Turns uploaded thumbnail bytes into a storage reference. Two strategies
//! exist behind the [`ThumbnailMaterializer`] trait: files written under the
//! asset root, and `data:` URLs embedded in the record.

pub mod materializer;
pub mod media_type;
pub mod token;

pub use materializer::{ImageUpload, ThumbnailMaterializer, build_materializer};
