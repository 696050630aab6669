//! # reunite-api
//!
//! HTTP API layer for Reunite built on Axum.
//!
//! Provides the auth endpoints, admin user management, the notification
//! publish surface, the WebSocket upgrade, and the mapping from domain
//! errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
