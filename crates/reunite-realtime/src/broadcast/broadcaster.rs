//! Notification broadcaster — delivers enveloped events to group members.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, warn};

use reunite_core::result::AppResult;

use crate::connection::handle::ConnectionId;
use crate::connection::registry::ConnectionRegistry;
use crate::group::membership::GroupMembership;
use crate::message::envelope::EventEnvelope;

/// Outcome of one group broadcast.
///
/// Callers get the counts back instead of having to grep logs; logging
/// of individual failures happens alongside as a side effect.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastReport {
    /// Group the event was sent to.
    pub group: String,
    /// How many member connections delivery was attempted to.
    pub attempted: usize,
    /// How many sends were accepted.
    pub delivered: usize,
    /// Connections whose send failed.
    pub failed: Vec<ConnectionId>,
}

impl BroadcastReport {
    /// Whether every attempted send was accepted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fans enveloped events out to every member of a group.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
    groups: Arc<GroupMembership>,
}

impl Broadcaster {
    /// Creates a broadcaster over an injected registry and membership
    /// table.
    pub fn new(registry: Arc<ConnectionRegistry>, groups: Arc<GroupMembership>) -> Self {
        Self { registry, groups }
    }

    /// Delivers an envelope to every current member of a group.
    ///
    /// The envelope is serialized once; each recipient send is then
    /// independent, so one dead or saturated connection never blocks the
    /// rest. Only a serialization failure is an error.
    pub async fn broadcast(&self, group: &str, envelope: &EventEnvelope) -> AppResult<BroadcastReport> {
        let text = envelope.to_text()?;
        let members = self.groups.members_of(group).await;

        let mut report = BroadcastReport {
            group: group.to_string(),
            attempted: members.len(),
            delivered: 0,
            failed: Vec::new(),
        };

        for conn_id in members {
            let Some(handle) = self.registry.get(&conn_id) else {
                // Membership raced ahead of disconnect cleanup.
                report.failed.push(conn_id);
                continue;
            };
            match handle.send(text.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        conn_id = %conn_id,
                        group = %group,
                        event = envelope.event.name(),
                        error = %e,
                        "Dropped broadcast to one connection"
                    );
                    report.failed.push(conn_id);
                }
            }
        }

        debug!(
            group = %group,
            event = envelope.event.name(),
            attempted = report.attempted,
            delivered = report.delivered,
            "Broadcast dispatched"
        );
        Ok(report)
    }

    /// Fire-and-forget broadcast for mutation paths.
    ///
    /// The triggering request never waits on, or fails because of,
    /// notification delivery; outcomes surface only in the logs.
    pub fn publish(&self, group: String, envelope: EventEnvelope) {
        let broadcaster = self.clone();
        tokio::spawn(async move {
            match broadcaster.broadcast(&group, &envelope).await {
                Ok(report) if !report.is_complete() => {
                    warn!(
                        group = %report.group,
                        failed = report.failed.len(),
                        delivered = report.delivered,
                        "Broadcast delivered partially"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    error!(group = %group, error = %e, "Broadcast failed to serialize");
                }
            }
        });
    }
}
