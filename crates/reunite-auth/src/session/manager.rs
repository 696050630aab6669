//! Session manager — login, refresh, and revocation flows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use reunite_core::config::auth::AuthConfig;
use reunite_core::error::AppError;
use reunite_entity::token::RefreshToken;
use reunite_entity::user::User;

use crate::jwt::TokenIssuer;
use crate::password::PasswordHasher;
use crate::store::{CredentialStore, RefreshTokenStore};

use super::token::generate_refresh_token;

/// Device label recorded when the client does not send one.
pub const DEFAULT_DEVICE: &str = "web";

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// The authenticated user.
    pub user: User,
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Drives the login / refresh / revoke protocol over the stores.
///
/// Each refresh rotates the presented token: the old row is revoked and
/// linked to its successor, never extended in place. The revocation step
/// is the store's compare-and-set, so a race between concurrent
/// redemptions of one token has exactly one winner.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User credential lookups.
    credentials: Arc<dyn CredentialStore>,
    /// The refresh token ledger.
    tokens: Arc<dyn RefreshTokenStore>,
    /// Access token issuance.
    issuer: Arc<TokenIssuer>,
    /// Password verification.
    hasher: Arc<PasswordHasher>,
    /// Refresh token lifetime in days.
    refresh_ttl_days: i64,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<dyn RefreshTokenStore>,
        issuer: Arc<TokenIssuer>,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            credentials,
            tokens,
            issuer,
            hasher,
            refresh_ttl_days: config.refresh_ttl_days,
        }
    }

    /// Performs the login flow.
    ///
    /// The account's disabled flag is checked before the password so a
    /// disabled account fails identically with or without the right
    /// password. Unknown emails and wrong passwords share one message.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device: Option<&str>,
    ) -> Result<AuthenticatedSession, AppError> {
        let user = self
            .credentials
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if user.disabled {
            warn!(user_id = %user.id, "Login attempt on disabled account");
            return Err(AppError::unauthorized("Account is disabled"));
        }

        let password_valid = self
            .hasher
            .verify_password(password, &user.password_hash)?;
        if !password_valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let device = device.unwrap_or(DEFAULT_DEVICE);
        let session = self.open_session(user, device).await?;

        info!(user_id = %session.user.id, device = %device, "Login successful");
        Ok(session)
    }

    /// Redeems a refresh token for a new access token and a successor
    /// refresh token.
    ///
    /// A missing, expired, or already-revoked token fails. Replay of a
    /// redeemed token is rejected permanently, even when its successor was
    /// itself revoked later.
    pub async fn refresh(&self, presented: &str) -> Result<AuthenticatedSession, AppError> {
        let row = self
            .tokens
            .find(presented)
            .await?
            .ok_or_else(|| AppError::unauthorized("Refresh token is not recognized"))?;

        if row.is_revoked() {
            warn!(
                user_id = %row.user_id,
                device = %row.device,
                "Replay of a revoked refresh token"
            );
            return Err(AppError::unauthorized(
                "Refresh token has already been used",
            ));
        }
        if row.is_expired() {
            return Err(AppError::unauthorized("Refresh token has expired"));
        }

        let user = self
            .credentials
            .find_by_id(row.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        if user.disabled {
            warn!(user_id = %user.id, "Refresh attempt on disabled account");
            return Err(AppError::unauthorized("Account is disabled"));
        }

        // The compare-and-set below is the authority on who redeems the
        // token; the checks above only produce precise error messages.
        let successor = generate_refresh_token();
        let redeemed = self.tokens.revoke_replacing(presented, &successor).await?;
        if !redeemed {
            warn!(user_id = %user.id, "Lost refresh redemption race");
            return Err(AppError::unauthorized(
                "Refresh token has already been used",
            ));
        }

        let issued = self.issuer.issue(&user)?;
        let now = Utc::now();
        let successor_row = RefreshToken {
            token: successor.clone(),
            user_id: user.id,
            device: row.device.clone(),
            created_at: now,
            expires_at: now + Duration::days(self.refresh_ttl_days),
            revoked_at: None,
            replaced_by_token: None,
        };
        self.tokens.insert(&successor_row).await?;

        info!(user_id = %user.id, device = %row.device, "Refresh token rotated");
        Ok(AuthenticatedSession {
            user,
            access_token: issued.token,
            access_expires_at: issued.expires_at,
            refresh_token: successor,
            refresh_expires_at: successor_row.expires_at,
        })
    }

    /// Revokes a refresh token without a successor (logout).
    ///
    /// Succeeds quietly whether or not the token was known or active, so
    /// the endpoint does not leak token validity.
    pub async fn revoke(&self, presented: &str) -> Result<(), AppError> {
        let revoked = self.tokens.revoke(presented).await?;
        if revoked {
            debug!("Refresh token revoked on logout");
        }
        Ok(())
    }

    /// Revokes every active refresh token a user holds.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let revoked = self.tokens.revoke_all_for_user(user_id).await?;
        if revoked > 0 {
            info!(user_id = %user_id, revoked, "Revoked all refresh tokens for user");
        }
        Ok(revoked)
    }

    /// Issues the access token plus the first refresh token of a chain.
    async fn open_session(
        &self,
        user: User,
        device: &str,
    ) -> Result<AuthenticatedSession, AppError> {
        let issued = self.issuer.issue(&user)?;
        let refresh_token = generate_refresh_token();
        let now = Utc::now();

        let row = RefreshToken {
            token: refresh_token.clone(),
            user_id: user.id,
            device: device.to_string(),
            created_at: now,
            expires_at: now + Duration::days(self.refresh_ttl_days),
            revoked_at: None,
            replaced_by_token: None,
        };
        self.tokens.insert(&row).await?;

        Ok(AuthenticatedSession {
            user,
            access_token: issued.token,
            access_expires_at: issued.expires_at,
            refresh_token,
            refresh_expires_at: row.expires_at,
        })
    }
}
