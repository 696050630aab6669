//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use reunite_core::config::auth::AuthConfig;
use reunite_core::error::AppError;

use super::claims::AccessClaims;

/// Validates access tokens presented on API requests and WebSocket
/// connection attempts.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "JWT signing key is missing; refusing to verify tokens",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5; // seconds, for clock skew
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates an access token string.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::unauthorized("Token issuer mismatch")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AppError::unauthorized("Token audience mismatch")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
