//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{info, warn};

use reunite_auth::jwt::AccessClaims;
use reunite_core::error::AppError;

use crate::state::AppState;

/// Query parameter for WebSocket authentication.
///
/// Browsers cannot set headers on WebSocket requests, so the access token
/// rides in the query string.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, AppError> {
    // Authenticate before upgrading; a bad token is a plain 401.
    let claims = state.token_verifier.verify(&query.token)?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, claims, socket)))
}

/// Drives an established WebSocket connection to completion.
async fn handle_socket(state: AppState, claims: AccessClaims, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let principal = claims.principal();
    let (handle, mut outbound_rx) = state.hub.connect(principal, claims.roles).await;
    let conn_id = handle.id;

    info!(
        conn_id = %conn_id,
        principal = %handle.principal,
        "WebSocket connection established"
    );

    // Forward queued outbound messages onto the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(text) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.hub.handle_message(&conn_id, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup runs for every exit path, normal close or transport error.
    outbound_task.abort();
    state.hub.disconnect(&conn_id).await;

    info!(conn_id = %conn_id, "WebSocket connection closed");
}
