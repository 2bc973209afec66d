//! JWT token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{ACCESS_TOKEN_ISSUER, Claims};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
