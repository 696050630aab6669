//! Role checks for guarded routes.

use reunite_core::error::AppError;
use reunite_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Requires the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.has_role(UserRole::Admin) {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

/// Requires Admin or Manager.
pub fn require_staff(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_staff() {
        return Err(AppError::forbidden("Manager or Admin access required"));
    }
    Ok(())
}
