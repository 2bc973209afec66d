//! Thumbnail upload handler.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use tracing::debug;

use tubely_core::error::AppError;
use tubely_entity::video::Video;
use tubely_storage::materializer::ImageUpload;

use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// Name of the multipart field carrying the image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// POST /api/thumbnail_upload/{video_id}
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, ApiError> {
    let video_id = parse_uuid(&video_id)?;
    let mut multipart =
        multipart.map_err(|e| AppError::malformed_form(format!("Couldn't parse request: {e}")))?;

    let upload = read_thumbnail_field(&mut multipart).await?;
    debug!(
        video_id = %video_id,
        file_name = ?upload.file_name,
        size = upload.len(),
        "Received thumbnail field"
    );

    let video = state
        .thumbnail_service
        .upload_thumbnail(&auth, video_id, upload)
        .await?;

    Ok(Json(video))
}

/// Reads the first `thumbnail` field into memory, skipping any others.
async fn read_thumbnail_field(multipart: &mut Multipart) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(ImageUpload {
            data,
            content_type,
            file_name,
        });
    }

    Err(AppError::missing_file(format!(
        "Unable to find '{THUMBNAIL_FIELD}' file in form"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(format!("Thumbnail upload too large: {}", err.body_text()))
    } else {
        AppError::malformed_form(format!("Couldn't parse form: {}", err.body_text()))
    }
}
