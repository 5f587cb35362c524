//! API token generation and hashing.
//!
//! Shared by the server's auth service and the `admin` CLI so both derive the same
//! stored hash from a raw token.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::code_generator::random_alphanumeric;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated API tokens (alphanumeric, ~285 bits of entropy).
pub const TOKEN_LENGTH: usize = 48;

/// Generates a new random API token.
pub fn generate_token() -> String {
    random_alphanumeric(TOKEN_LENGTH)
}

/// Hashes a raw token with HMAC-SHA256 keyed by `secret`.
///
/// Returns a 64-character lowercase hex string.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
