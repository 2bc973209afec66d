//! # tubely-core
//!
//! Core crate for Tubely. Contains configuration schemas, the repository
//! trait implemented by the metadata stores, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Tubely crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
