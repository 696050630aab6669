//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the Reunite system.
///
/// Accounts are never hard-deleted. An administrator disables them
/// instead, which blocks both login and refresh while preserving the
/// account's history on its cases.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address, unique case-insensitively. Doubles as the login name.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Roles held by this account.
    pub roles: Vec<UserRole>,
    /// Whether the account is disabled.
    pub disabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether this account holds the given role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    /// Check whether this account holds any staff role.
    pub fn is_staff(&self) -> bool {
        self.roles.iter().any(UserRole::is_staff)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub display_name: String,
    /// Initial roles.
    pub roles: Vec<UserRole>,
}
