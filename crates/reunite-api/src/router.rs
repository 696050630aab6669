//! Route definitions for the Reunite HTTP API.
//!
//! REST routes are organized by domain and mounted under `/api`; the
//! WebSocket upgrade lives at the root. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Builds the route tree with state applied. Middleware layers are added
/// by [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_handler));

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin endpoints: user management and the notification publish surface
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::users::list_users))
        .route(
            "/admin/users/{id}/roles",
            put(handlers::users::update_roles),
        )
        .route(
            "/admin/users/{id}/status",
            put(handlers::users::update_status),
        )
        .route("/admin/notify", post(handlers::notify::notify))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
