//! Opaque refresh token generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated refresh tokens in characters.
///
/// Tokens are URL-safe alphanumerics, roughly 5.95 bits of entropy per
/// character, so 48 characters is ~285 bits.
const REFRESH_TOKEN_LENGTH: usize = 48;

/// Generate a fresh opaque refresh token.
///
/// The value is random and carries no structure; everything the server
/// knows about it lives in the ledger row.
pub fn generate_refresh_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
