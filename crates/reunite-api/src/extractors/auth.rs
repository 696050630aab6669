//! `AuthUser` extractor — pulls the JWT from the Authorization header and
//! verifies it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use reunite_auth::jwt::AccessClaims;
use reunite_core::error::AppError;

use crate::state::AppState;

/// Verified access-token claims available to handlers.
///
/// Verification is purely cryptographic; no store lookup happens here.
/// Handlers that need the current database row (or must observe a
/// just-disabled account) load it themselves.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AccessClaims);

impl std::ops::Deref for AuthUser {
    type Target = AccessClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.token_verifier.verify(token)?;
        Ok(AuthUser(claims))
    }
}
