//! Typed broadcast group names with role-based admission.

use std::fmt;
use std::str::FromStr;

use reunite_core::error::AppError;
use reunite_entity::user::UserRole;

/// The broadcast groups clients may belong to.
///
/// Wire names are `Admins`, `law-enforcement`, and `case-{id}`; the enum
/// keeps admission decisions typed instead of string-matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Group {
    /// Staff-wide change feed.
    Admins,
    /// Feed restricted to sworn personnel.
    LawEnforcement,
    /// Per-case collaboration feed.
    Case(i64),
}

impl Group {
    /// Whether a principal holding these roles may join this group.
    ///
    /// Case groups admit any authenticated principal; the case itself
    /// gates visibility elsewhere.
    pub fn admits(&self, roles: &[UserRole]) -> bool {
        match self {
            Group::Admins => roles.iter().any(|r| r.is_staff()),
            Group::LawEnforcement => roles
                .iter()
                .any(|r| matches!(r, UserRole::LawEnforcement | UserRole::Admin)),
            Group::Case(_) => true,
        }
    }

    /// Groups a connection is joined to automatically at connect time,
    /// based on its roles. Case groups are always joined explicitly.
    pub fn defaults_for(roles: &[UserRole]) -> Vec<Group> {
        let mut groups = Vec::new();
        if roles.iter().any(|r| r.is_staff()) {
            groups.push(Group::Admins);
        }
        if roles.contains(&UserRole::LawEnforcement) {
            groups.push(Group::LawEnforcement);
        }
        groups
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Admins => write!(f, "Admins"),
            Group::LawEnforcement => write!(f, "law-enforcement"),
            Group::Case(id) => write!(f, "case-{id}"),
        }
    }
}

impl FromStr for Group {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admins" => Ok(Group::Admins),
            "law-enforcement" => Ok(Group::LawEnforcement),
            other => other
                .strip_prefix("case-")
                .and_then(|id| id.parse::<i64>().ok())
                .map(Group::Case)
                .ok_or_else(|| AppError::validation(format!("Unknown group name: {other}"))),
        }
    }
}
