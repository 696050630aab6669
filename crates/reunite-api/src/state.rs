//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use reunite_auth::jwt::TokenVerifier;
use reunite_auth::password::PasswordHasher;
use reunite_auth::session::SessionManager;
use reunite_core::config::AppConfig;
use reunite_database::connection::DatabasePool;
use reunite_database::repositories::UserRepository;
use reunite_realtime::hub::RealtimeHub;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All heavy fields
/// are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db: DatabasePool,
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Password hasher (Argon2).
    pub password_hasher: Arc<PasswordHasher>,
    /// Access token verifier.
    pub token_verifier: Arc<TokenVerifier>,
    /// Login / refresh / revoke protocol.
    pub session_manager: Arc<SessionManager>,
    /// Realtime hub for connections, groups, and fan-out.
    pub hub: Arc<RealtimeHub>,
    /// When the process started, for the health endpoint.
    pub started_at: Instant,
}
