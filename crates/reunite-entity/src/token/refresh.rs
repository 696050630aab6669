//! Refresh token ledger entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row in the refresh token ledger.
///
/// The opaque token string itself is the primary key. Redeeming a token
/// never extends it in place: the presented row is revoked and a successor
/// row is inserted with `replaced_by_token` pointing forward, so every
/// device session leaves an auditable rotation chain.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// The opaque token value handed to the client.
    pub token: String,
    /// The user this token belongs to.
    pub user_id: Uuid,
    /// Device label supplied at login (`"web"` when the client sent none).
    pub device: String,
    /// When the token was created.
    pub created_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked, if it has been.
    pub revoked_at: Option<DateTime<Utc>>,
    /// The token that superseded this one on redemption, if any.
    pub replaced_by_token: Option<String>,
}

impl RefreshToken {
    /// Check whether the token has passed its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check whether the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check whether the token can still be redeemed.
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}
