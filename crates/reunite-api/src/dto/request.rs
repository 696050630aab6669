//! Request DTOs.

use serde::{Deserialize, Serialize};

use reunite_entity::user::UserRole;
use reunite_realtime::message::event::ServerEvent;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address, also the login identifier.
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Name shown to other users.
    pub display_name: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Optional device label recorded on the refresh token.
    #[serde(default)]
    pub device: Option<String>,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token to redeem.
    pub refresh_token: String,
}

/// Logout request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke.
    pub refresh_token: String,
}

/// Role replacement request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdateRequest {
    /// The complete new role set.
    pub roles: Vec<UserRole>,
}

/// Account enable/disable request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// Whether the account is disabled.
    pub disabled: bool,
}

/// Notification publish request (staff).
///
/// The event sits beside the group in one flat object, e.g.
/// `{"group":"Admins","event":"RunnerChanged","operation":"update","runner":{...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    /// Target group wire name.
    pub group: String,
    /// The event to fan out.
    #[serde(flatten)]
    pub event: ServerEvent,
}
