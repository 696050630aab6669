//! Access token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use reunite_core::config::auth::AuthConfig;
use reunite_core::error::AppError;
use reunite_entity::user::User;

use super::claims::AccessClaims;

/// Creates signed access tokens.
///
/// Issuance is a pure function of the user, the configuration, and the
/// clock. Nothing is persisted.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Stamped into the `iss` claim.
    issuer: String,
    /// Stamped into the `aud` claim.
    audience: String,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

/// A freshly minted access token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IssuedAccessToken {
    /// The signed compact JWT.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    ///
    /// Fails with a configuration error when the signing key is absent.
    /// This is checked at construction so a misconfigured deployment dies
    /// at startup instead of failing per-request.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "JWT signing key is missing; refusing to issue tokens",
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            access_ttl_minutes: config.access_ttl_minutes,
        })
    }

    /// Issues an access token for the given user.
    ///
    /// The claim set carries the subject id, email, display name, and one
    /// entry per role. An empty role set is valid.
    pub fn issue(&self, user: &User) -> Result<IssuedAccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = AccessClaims {
            sub: user.id,
            email: user.email.clone(),
            name: user.display_name.clone(),
            roles: user.roles.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedAccessToken { token, expires_at })
    }
}
