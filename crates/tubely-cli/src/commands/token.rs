//! Issue access tokens for local testing and scripting.

use chrono::{DateTime, Duration, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use tubely_auth::JwtEncoder;
use tubely_core::config::AppConfig;
use tubely_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User the token is issued for
    #[arg(short, long)]
    pub user_id: Uuid,

    /// Token lifetime in minutes (defaults to `auth.access_ttl_minutes`)
    #[arg(short, long)]
    pub ttl_minutes: Option<i64>,
}

#[derive(Debug, Serialize, Tabled)]
struct IssuedToken {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    access_token: String,
}

/// Execute the token command
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let encoder = JwtEncoder::new(&config.auth);

    let (access_token, expires_at) = match args.ttl_minutes {
        Some(minutes) if minutes <= 0 => {
            return Err(AppError::configuration("--ttl-minutes must be positive"));
        }
        Some(minutes) => encoder.issue_access_token_with_ttl(args.user_id, Duration::minutes(minutes))?,
        None => encoder.issue_access_token(args.user_id)?,
    };

    output::print_record(
        &IssuedToken {
            user_id: args.user_id,
            expires_at,
            access_token,
        },
        format,
    );
    Ok(())
}
