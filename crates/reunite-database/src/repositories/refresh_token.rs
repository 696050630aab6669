//! Refresh token ledger repository.

use sqlx::PgPool;
use uuid::Uuid;

use reunite_core::error::{AppError, ErrorKind};
use reunite_core::result::AppResult;
use reunite_entity::token::RefreshToken;

/// Repository for the refresh token rotation ledger.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly issued token row.
    pub async fn insert(&self, token: &RefreshToken) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens \
             (token, user_id, device, created_at, expires_at, revoked_at, replaced_by_token) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&token.token)
        .bind(token.user_id)
        .bind(&token.device)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .bind(&token.replaced_by_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert refresh token", e)
        })
    }

    /// Look up a token row by its opaque value.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
            })
    }

    /// Atomically revoke an active token in favor of its successor.
    ///
    /// The `revoked_at IS NULL` guard makes concurrent redemptions of the
    /// same token race on a single row update, so at most one caller sees
    /// `true`; everyone else finds the token already revoked.
    pub async fn revoke_replacing(&self, token: &str, successor: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens \
             SET revoked_at = NOW(), replaced_by_token = $2 \
             WHERE token = $1 AND revoked_at IS NULL AND expires_at > NOW()",
        )
        .bind(token)
        .bind(successor)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to redeem refresh token", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Revoke a token without a successor (logout).
    pub async fn revoke(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() \
             WHERE token = $1 AND revoked_at IS NULL",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Revoke every active token a user holds. Used when an account is
    /// disabled.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() \
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user tokens", e)
        })?;

        Ok(result.rows_affected())
    }
}
