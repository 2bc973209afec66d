//! Video entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A video record owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Video {
    /// Unique video identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Storage reference of the current thumbnail: an asset URL or a
    /// `data:` URL, depending on the configured strategy.
    pub thumbnail_url: Option<String>,
    /// Location of the video file itself.
    pub video_url: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Build a new, not yet persisted video.
    pub fn new(data: CreateVideo) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` owns this video.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Whether this record carries the nil identifier some stores return
    /// in place of "no row".
    pub fn is_nil(&self) -> bool {
        self.id.is_nil()
    }
}

/// Data required to create a new video record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideo {
    /// The owning user.
    pub user_id: Uuid,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(owner: Uuid) -> Video {
        Video::new(CreateVideo {
            user_id: owner,
            title: "Boots demo".to_string(),
            description: String::new(),
        })
    }

    #[test]
    fn test_new_video_has_no_thumbnail() {
        let video = sample(Uuid::new_v4());
        assert!(video.thumbnail_url.is_none());
        assert!(!video.is_nil());
        assert_eq!(video.created_at, video.updated_at);
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let video = sample(owner);
        assert!(video.is_owned_by(owner));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_serializes_null_thumbnail() {
        let video = sample(Uuid::new_v4());
        let json = serde_json::to_value(&video).expect("serialize");
        assert!(json["thumbnail_url"].is_null());
        assert_eq!(json["title"], "Boots demo");
    }
}
