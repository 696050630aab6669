//! The login / refresh / revoke protocol.

pub mod manager;
pub mod token;

pub use manager::{AuthenticatedSession, DEFAULT_DEVICE, SessionManager};
pub use token::generate_refresh_token;
