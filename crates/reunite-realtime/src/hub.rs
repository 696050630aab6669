//! Realtime hub — connection lifecycle and group requests.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use reunite_core::config::realtime::RealtimeConfig;
use reunite_entity::user::UserRole;

use crate::broadcast::broadcaster::Broadcaster;
use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::connection::registry::ConnectionRegistry;
use crate::group::membership::GroupMembership;
use crate::group::name::Group;
use crate::message::envelope::EventEnvelope;
use crate::message::event::ServerEvent;
use crate::message::inbound::ClientMessage;

/// Orchestrates connections, group membership, and fan-out.
///
/// The hub owns nothing global; it is built over an injected registry
/// and membership table so several hubs (or a test harness) can coexist
/// in one process.
#[derive(Debug, Clone)]
pub struct RealtimeHub {
    registry: Arc<ConnectionRegistry>,
    groups: Arc<GroupMembership>,
    broadcaster: Broadcaster,
    config: RealtimeConfig,
}

impl RealtimeHub {
    /// Wires a hub over shared registry and membership state.
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        groups: Arc<GroupMembership>,
        config: RealtimeConfig,
    ) -> Self {
        let broadcaster = Broadcaster::new(Arc::clone(&registry), Arc::clone(&groups));
        Self {
            registry,
            groups,
            broadcaster,
            config,
        }
    }

    /// Admits an authenticated connection.
    ///
    /// Returns the handle plus the receiver the transport drains into the
    /// socket. The connection starts out in the groups its roles imply;
    /// case groups are joined explicitly afterwards.
    pub async fn connect(
        &self,
        principal: String,
        roles: Vec<UserRole>,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.outbound_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(principal, roles, tx));
        self.registry.register(Arc::clone(&handle));

        for group in Group::defaults_for(&handle.roles) {
            self.groups.join(handle.id, &group.to_string()).await;
        }

        info!(
            conn_id = %handle.id,
            principal = %handle.principal,
            "Connection admitted"
        );
        (handle, rx)
    }

    /// Processes one raw message from a client.
    pub async fn handle_message(&self, conn_id: &ConnectionId, raw: &str) {
        let Some(handle) = self.registry.get(conn_id) else {
            warn!(conn_id = %conn_id, "Message from unknown connection");
            return;
        };

        let message: ClientMessage = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                self.send_event(
                    &handle,
                    ServerEvent::Error {
                        code: "INVALID_MESSAGE".to_string(),
                        message: format!("Failed to parse message: {e}"),
                    },
                );
                return;
            }
        };

        match message {
            ClientMessage::Join { group } => self.handle_join(&handle, &group).await,
            ClientMessage::Leave { group } => {
                self.groups.leave(handle.id, &group).await;
                debug!(conn_id = %handle.id, group = %group, "Left group");
                self.send_event(&handle, ServerEvent::GroupLeft { group });
            }
        }
    }

    /// Tears a connection down.
    ///
    /// Cleanup always completes; the "left" notifications to former group
    /// peers are best-effort and never block or fail the disconnect.
    pub async fn disconnect(&self, conn_id: &ConnectionId) {
        let Some(handle) = self.registry.unregister(conn_id) else {
            return;
        };
        handle.mark_dead();

        let former_groups = self.groups.remove_connection(*conn_id).await;
        for group in &former_groups {
            let envelope = EventEnvelope::system(ServerEvent::MemberLeft {
                group: group.clone(),
                principal: handle.principal.clone(),
            });
            if let Err(e) = self.broadcaster.broadcast(group, &envelope).await {
                warn!(group = %group, error = %e, "Failed to announce departure");
            }
        }

        info!(
            conn_id = %conn_id,
            principal = %handle.principal,
            groups = former_groups.len(),
            "Connection closed"
        );
    }

    /// The broadcaster bound to this hub's registry and membership.
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.registry.count()
    }

    /// Validates a join request, updates membership, and acks.
    async fn handle_join(&self, handle: &ConnectionHandle, group_name: &str) {
        let group: Group = match group_name.parse() {
            Ok(g) => g,
            Err(_) => {
                self.send_event(
                    handle,
                    ServerEvent::Error {
                        code: "UNKNOWN_GROUP".to_string(),
                        message: format!("Unknown group name: {group_name}"),
                    },
                );
                return;
            }
        };

        if !group.admits(&handle.roles) {
            warn!(
                conn_id = %handle.id,
                principal = %handle.principal,
                group = %group_name,
                "Join refused for insufficient role"
            );
            self.send_event(
                handle,
                ServerEvent::Error {
                    code: "FORBIDDEN".to_string(),
                    message: format!("Not authorized to join group: {group_name}"),
                },
            );
            return;
        }

        if self.groups.group_count(handle.id).await >= self.config.max_groups_per_connection {
            self.send_event(
                handle,
                ServerEvent::Error {
                    code: "MAX_GROUPS".to_string(),
                    message: format!(
                        "Maximum groups per connection ({}) reached",
                        self.config.max_groups_per_connection
                    ),
                },
            );
            return;
        }

        self.groups.join(handle.id, group_name).await;
        debug!(conn_id = %handle.id, group = %group_name, "Joined group");
        self.send_event(
            handle,
            ServerEvent::GroupJoined {
                group: group_name.to_string(),
            },
        );
    }

    /// Queues an event for one connection, logging any failure.
    fn send_event(&self, handle: &ConnectionHandle, event: ServerEvent) {
        let envelope = EventEnvelope::system(event);
        match envelope.to_text() {
            Ok(text) => {
                if let Err(e) = handle.send(text) {
                    debug!(conn_id = %handle.id, error = %e, "Could not deliver event");
                }
            }
            Err(e) => warn!(conn_id = %handle.id, error = %e, "Could not encode event"),
        }
    }
}
