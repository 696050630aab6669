//! Staff notification publish handler.

use axum::Json;
use axum::extract::State;

use reunite_core::error::AppError;
use reunite_realtime::broadcast::broadcaster::BroadcastReport;
use reunite_realtime::group::name::Group;
use reunite_realtime::message::envelope::EventEnvelope;

use crate::dto::request::NotifyRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_staff;
use crate::state::AppState;

/// POST /api/admin/notify
///
/// The publish surface collaborator subsystems call after a mutation
/// (runner edits, case publication, and the like). Unlike the
/// fire-and-forget broadcasts on auth mutations, the caller here gets
/// the delivery report back.
pub async fn notify(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NotifyRequest>,
) -> Result<Json<ApiResponse<BroadcastReport>>, AppError> {
    require_staff(&auth)?;

    // Reject typos early instead of broadcasting into a void.
    let _: Group = req.group.parse()?;

    let envelope = EventEnvelope::new(req.event, Some(auth.principal().to_string()));
    let report = state.hub.broadcaster().broadcast(&req.group, &envelope).await?;

    Ok(Json(ApiResponse::ok(report)))
}
