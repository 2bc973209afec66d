//! JWT access token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tubely_core::config::AuthConfig;
use tubely_core::error::AppError;

use super::claims::{ACCESS_TOKEN_ISSUER, Claims};

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Default token lifetime.
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes as i64),
        }
    }

    /// Issues an access token for `user_id` with the configured lifetime.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>), AppError> {
        self.issue_access_token_with_ttl(user_id, self.access_ttl)
    }

    /// Issues an access token with an explicit lifetime.
    pub fn issue_access_token_with_ttl(
        &self,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }
}
