//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tubely_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
///
/// Ownership failures share 401 with credential failures; the body code
/// tells them apart.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingCredential | ErrorKind::InvalidCredential | ErrorKind::Forbidden => {
            StatusCode::UNAUTHORIZED
        }
        ErrorKind::BadIdentifier
        | ErrorKind::MalformedForm
        | ErrorKind::MissingFile
        | ErrorKind::UnsupportedMediaType
        | ErrorKind::NotFound
        | ErrorKind::LookupFailure
        | ErrorKind::PersistFailure => StatusCode::BAD_REQUEST,
        ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::StorageWriteFailure | ErrorKind::Configuration | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers and extractors return this so `?` on any `AppResult` converts
/// through `From`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
        } else {
            tracing::warn!(kind = %err.kind, error = %err.message, "Request rejected");
        }

        let body = ApiErrorResponse {
            error: err.kind.code().to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::MissingCredential), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::InvalidCredential), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::BadIdentifier), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::PersistFailure), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::PayloadTooLarge), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            status_for(ErrorKind::StorageWriteFailure),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_response_status_and_body_from_error() {
        let response =
            ApiError::from(AppError::forbidden("Not authorized to update this video")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body.error, "FORBIDDEN");
        assert_eq!(body.message, "Not authorized to update this video");

        let response = ApiError(AppError::internal("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError(AppError::payload_too_large("too big")).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
