//! Authentication and token configuration.
//!
//! The signing key, issuer, audience, and both token lifetimes have no
//! code-level defaults. They must appear in the configuration files or the
//! environment, and startup validation rejects empty values.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    pub jwt_secret: String,
    /// The `iss` claim stamped into and required from access tokens.
    pub jwt_issuer: String,
    /// The `aud` claim stamped into and required from access tokens.
    pub jwt_audience: String,
    /// Access token lifetime in minutes.
    pub access_ttl_minutes: i64,
    /// Refresh token lifetime in days.
    pub refresh_ttl_days: i64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

fn default_password_min() -> usize {
    8
}
