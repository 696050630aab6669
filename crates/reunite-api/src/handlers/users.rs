//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::info;
use uuid::Uuid;

use reunite_core::error::AppError;
use reunite_core::types::pagination::{PageRequest, PageResponse};
use reunite_entity::user::User;
use reunite_realtime::message::envelope::EventEnvelope;
use reunite_realtime::message::event::{ChangeOp, ServerEvent};

use crate::dto::request::{RoleUpdateRequest, StatusUpdateRequest};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::middleware::rbac::{require_admin, require_staff};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    require_staff(&auth)?;

    let page = PageRequest::new(page.page, page.page_size);
    let users = state.user_repo.find_all(&page).await?;
    let responses = PageResponse::new(
        users.items.into_iter().map(UserResponse::from).collect(),
        users.page,
        users.page_size,
        users.total_items,
    );

    Ok(Json(ApiResponse::ok(responses)))
}

/// PUT /api/admin/users/{id}/roles
pub async fn update_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RoleUpdateRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    require_admin(&auth)?;
    if req.roles.is_empty() {
        return Err(AppError::validation("At least one role is required"));
    }

    let user = state.user_repo.update_roles(id, &req.roles).await?;
    info!(user_id = %user.id, roles = ?user.roles, "Roles replaced");

    publish_user_changed(&state, &auth, user.clone());
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/admin/users/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    require_admin(&auth)?;

    let user = state.user_repo.set_disabled(id, req.disabled).await?;

    // A disabled account keeps no working refresh tokens; its live access
    // tokens simply age out.
    if req.disabled {
        let revoked = state.session_manager.revoke_all_for_user(id).await?;
        info!(user_id = %id, revoked, "Account disabled");
    } else {
        info!(user_id = %id, "Account enabled");
    }

    publish_user_changed(&state, &auth, user.clone());
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// Fans a `UserChanged` update out to the admin feed without blocking the
/// mutation that triggered it.
fn publish_user_changed(state: &AppState, auth: &AuthUser, user: User) {
    let payload = match serde_json::to_value(UserResponse::from(user)) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping user change broadcast");
            return;
        }
    };
    state.hub.broadcaster().publish(
        "Admins".to_string(),
        EventEnvelope::new(
            ServerEvent::UserChanged {
                operation: ChangeOp::Update,
                user: payload,
            },
            Some(auth.principal().to_string()),
        ),
    );
}
