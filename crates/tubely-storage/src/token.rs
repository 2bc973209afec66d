//! Random file name tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// Entropy per token, in bytes.
pub const TOKEN_BYTES: usize = 32;

/// Generates a filename-safe token from 256 bits of CSPRNG output.
///
/// Collisions are not checked for.
pub fn random_file_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
