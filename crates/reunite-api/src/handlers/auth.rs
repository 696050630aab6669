//! Auth handlers — register, login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use tracing::info;

use reunite_core::error::AppError;
use reunite_entity::user::{NewUser, UserRole};
use reunite_realtime::message::envelope::EventEnvelope;
use reunite_realtime::message::event::{ChangeOp, ServerEvent};

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email address is required"));
    }
    let min_length = state.config.auth.password_min_length;
    if req.password.len() < min_length {
        return Err(AppError::validation(format!(
            "Password must be at least {min_length} characters"
        )));
    }
    if req.display_name.trim().is_empty() {
        return Err(AppError::validation("Display name is required"));
    }

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .user_repo
        .create(&NewUser {
            email: email.to_string(),
            password_hash,
            display_name: req.display_name.trim().to_string(),
            roles: vec![UserRole::Member],
        })
        .await?;

    info!(user_id = %user.id, "User registered");

    let response = UserResponse::from(user);
    state.hub.broadcaster().publish(
        "Admins".to_string(),
        EventEnvelope::new(
            ServerEvent::UserChanged {
                operation: ChangeOp::Create,
                user: serde_json::to_value(&response)?,
            },
            Some(response.email.clone()),
        ),
    );

    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let session = state
        .session_manager
        .login(&req.email, &req.password, req.device.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        access_expires_at: session.access_expires_at,
        refresh_expires_at: session.refresh_expires_at,
        user: UserResponse::from(session.user),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let session = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        access_expires_at: session.access_expires_at,
        refresh_expires_at: session.refresh_expires_at,
        user: UserResponse::from(session.user),
    })))
}

/// POST /api/auth/logout
///
/// Succeeds whether or not the token was known, so the endpoint does not
/// leak which tokens exist.
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.session_manager.revoke(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_repo
        .find_by_id(auth.sub)
        .await?
        .ok_or_else(|| AppError::not_found("User no longer exists"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
