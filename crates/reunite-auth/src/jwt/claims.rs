//! JWT claims structure embedded in access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reunite_entity::user::UserRole;

/// Principal name used when a token carries no email claim.
pub const UNKNOWN_PRINCIPAL: &str = "Unknown";

/// Claims payload of a Reunite access token.
///
/// Access tokens are never persisted or revoked server-side. They stay
/// valid until `exp`, which is why their lifetime is short.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Email address of the subject.
    #[serde(default)]
    pub email: String,
    /// Display name of the subject.
    #[serde(default)]
    pub name: String,
    /// Roles held at issuance time, one entry per role. May be empty.
    #[serde(default)]
    pub roles: Vec<UserRole>,
    /// Token issuer.
    pub iss: String,
    /// Token audience.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The principal string live connections are registered under.
    ///
    /// Falls back to [`UNKNOWN_PRINCIPAL`] for tokens without an email
    /// claim.
    pub fn principal(&self) -> String {
        if self.email.is_empty() {
            UNKNOWN_PRINCIPAL.to_string()
        } else {
            self.email.clone()
        }
    }

    /// Checks whether the subject held the given role at issuance.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    /// Checks whether the subject held any staff role at issuance.
    pub fn is_staff(&self) -> bool {
        self.roles.iter().any(UserRole::is_staff)
    }
}
