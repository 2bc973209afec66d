//! Thumbnail storage configuration.

use serde::{Deserialize, Serialize};

/// How uploaded thumbnails are turned into a storage reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailStrategy {
    /// Write a file under the asset root and reference it by URL.
    #[default]
    Disk,
    /// Embed the image in the record as a `data:` URL.
    Inline,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory that receives thumbnail files and is served at `/assets`.
    #[serde(default = "default_assets_root")]
    pub assets_root: String,
    /// Materialization strategy.
    #[serde(default)]
    pub strategy: ThumbnailStrategy,
    /// Maximum multipart body size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            strategy: ThumbnailStrategy::default(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

fn default_assets_root() -> String {
    "./assets".to_string()
}

fn default_max_upload() -> u64 {
    10 << 20 // 10 MiB
}
