//! Envelope stamping events with server time and the acting principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reunite_core::result::AppResult;

use super::event::ServerEvent;

/// An event as it crosses the wire.
///
/// The timestamp is assigned by the server when the envelope is built,
/// never taken from the client. The actor lets recipients distinguish
/// their own echoes from changes made by peers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// The event payload, flattened into the envelope object.
    #[serde(flatten)]
    pub event: ServerEvent,
    /// Who triggered the change, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Server time the envelope was created.
    pub timestamp: DateTime<Utc>,
}

impl EventEnvelope {
    /// Stamps an event with the current server time and an actor.
    pub fn new(event: ServerEvent, actor: Option<String>) -> Self {
        Self {
            event,
            actor,
            timestamp: Utc::now(),
        }
    }

    /// Stamps a system-originated event with no acting principal.
    pub fn system(event: ServerEvent) -> Self {
        Self::new(event, None)
    }

    /// Serializes the envelope to its wire form.
    pub fn to_text(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
