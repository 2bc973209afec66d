//! Core traits defined in `tubely-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
