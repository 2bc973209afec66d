//! # tubely-auth
//!
//! Authentication for Tubely.
//!
//! ## Modules
//!
//! - `bearer` — `Authorization: Bearer <token>` header parsing
//! - `jwt` — access token creation and validation

pub mod bearer;
pub mod jwt;

pub use bearer::parse_bearer;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
