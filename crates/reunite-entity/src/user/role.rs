//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user account can hold.
///
/// An account holds a *set* of roles rather than a single one, and every
/// role check goes through typed membership tests. The serialized form is
/// the PascalCase variant name, which is also what appears in token claims
/// (`"Admin"`, `"LawEnforcement"`). The database stores the snake_case
/// `user_role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Can manage users and cases, but not system configuration.
    Manager,
    /// Sworn law-enforcement account with access to restricted case data.
    LawEnforcement,
    /// Registered relative or volunteer following public cases.
    Member,
}

impl UserRole {
    /// Check whether this role carries staff privileges.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Return the role as its claim string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::LawEnforcement => "LawEnforcement",
            Self::Member => "Member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = reunite_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "lawenforcement" | "law_enforcement" | "law-enforcement" => Ok(Self::LawEnforcement),
            "member" => Ok(Self::Member),
            _ => Err(reunite_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: Admin, Manager, LawEnforcement, Member"
            ))),
        }
    }
}
