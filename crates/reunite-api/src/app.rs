//! Application builder — wires state, router, and middleware into an
//! Axum app and runs it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use reunite_auth::jwt::{TokenIssuer, TokenVerifier};
use reunite_auth::password::PasswordHasher;
use reunite_auth::session::SessionManager;
use reunite_auth::store::{CredentialStore, RefreshTokenStore};
use reunite_core::config::AppConfig;
use reunite_core::error::AppError;
use reunite_database::connection::DatabasePool;
use reunite_database::repositories::{RefreshTokenRepository, UserRepository};
use reunite_realtime::connection::registry::ConnectionRegistry;
use reunite_realtime::group::membership::GroupMembership;
use reunite_realtime::hub::RealtimeHub;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Constructs the application state over a connected database pool.
pub fn build_state(config: AppConfig, db: DatabasePool) -> Result<AppState, AppError> {
    // ── Step 1: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let refresh_repo = Arc::new(RefreshTokenRepository::new(db.pool().clone()));

    // ── Step 2: Auth system ──────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let token_issuer = Arc::new(TokenIssuer::new(&config.auth)?);
    let token_verifier = Arc::new(TokenVerifier::new(&config.auth)?);
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&user_repo) as Arc<dyn CredentialStore>,
        Arc::clone(&refresh_repo) as Arc<dyn RefreshTokenStore>,
        token_issuer,
        Arc::clone(&password_hasher),
        &config.auth,
    ));

    // ── Step 3: Realtime hub ─────────────────────────────────────
    let registry = Arc::new(ConnectionRegistry::new());
    let membership = Arc::new(GroupMembership::new());
    let hub = Arc::new(RealtimeHub::new(registry, membership, config.realtime.clone()));

    Ok(AppState {
        config: Arc::new(config),
        db,
        user_repo,
        password_hasher,
        token_verifier,
        session_manager,
        hub,
        started_at: Instant::now(),
    })
}

/// Runs the Reunite server until shutdown is signalled.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Reunite server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
