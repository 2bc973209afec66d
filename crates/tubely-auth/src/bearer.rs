//! `Authorization` header parsing.

use tubely_core::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
///
/// `None` means the header was absent. Both an absent header and a value
/// that is not `Bearer <token>` are reported as a missing credential.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let header =
        header.ok_or_else(|| AppError::missing_credential("Missing Authorization header"))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| AppError::missing_credential("Invalid Authorization header format"))?;

    if token.is_empty() {
        return Err(AppError::missing_credential("Empty bearer token"));
    }

    Ok(token)
}
