//! Unified application error types for Tubely.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Each [`ErrorKind`] names one way the
//! thumbnail upload flow can terminate.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No bearer credential, or the `Authorization` header is malformed.
    MissingCredential,
    /// The bearer credential failed validation (expired, bad signature, ...).
    InvalidCredential,
    /// The record identifier in the path is not a valid UUID.
    BadIdentifier,
    /// The multipart form could not be parsed.
    MalformedForm,
    /// The request body exceeded the configured upload bound.
    PayloadTooLarge,
    /// The multipart form has no file field.
    MissingFile,
    /// The metadata store failed while loading the record.
    LookupFailure,
    /// The record does not exist.
    NotFound,
    /// The requester does not own the record.
    Forbidden,
    /// The declared content type has no usable representation.
    UnsupportedMediaType,
    /// The image could not be written to the asset root.
    StorageWriteFailure,
    /// The metadata store failed while saving the record.
    PersistFailure,
    /// The configuration is invalid or could not be loaded.
    Configuration,
    /// An unexpected internal error.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl ErrorKind {
    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::BadIdentifier => "BAD_IDENTIFIER",
            Self::MalformedForm => "MALFORMED_FORM",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::MissingFile => "MISSING_FILE",
            Self::LookupFailure => "LOOKUP_FAILURE",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::StorageWriteFailure => "STORAGE_WRITE_FAILURE",
            Self::PersistFailure => "PERSIST_FAILURE",
            Self::Configuration => "CONFIGURATION",
            Self::Internal => "INTERNAL",
        }
    }
}

/// The unified application error used throughout Tubely.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-credential error.
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredential, message)
    }

    /// Create an invalid-credential error.
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredential, message)
    }

    /// Create a bad-identifier error.
    pub fn bad_identifier(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadIdentifier, message)
    }

    /// Create a malformed-form error.
    pub fn malformed_form(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedForm, message)
    }

    /// Create a payload-too-large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    /// Create a missing-file error.
    pub fn missing_file(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingFile, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create an unsupported-media-type error.
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedMediaType, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
