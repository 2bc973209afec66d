//! Request context carrying the authenticated requester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the API extractor once the bearer credential has been
/// validated, then passed into service methods so every operation knows
/// who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The requester identity (the credential's subject).
    pub user_id: Uuid,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, ip_address: String, user_agent: Option<String>) -> Self {
        Self {
            user_id,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// A context for callers outside HTTP (CLI, tests).
    pub fn system(user_id: Uuid) -> Self {
        Self::new(user_id, "127.0.0.1".to_string(), None)
    }
}
