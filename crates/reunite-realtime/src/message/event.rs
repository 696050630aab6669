//! Typed change events fanned out to group members.

use serde::{Deserialize, Serialize};

/// What happened to the entity an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Create,
    Update,
    Delete,
}

/// Events the server pushes to connected clients.
///
/// The tag is the event name clients dispatch on; entity payloads stay
/// schemaless JSON because the entities themselves belong to collaborator
/// subsystems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ServerEvent {
    /// A user account changed.
    UserChanged {
        /// What happened.
        operation: ChangeOp,
        /// The affected user, as the originating subsystem shaped it.
        user: serde_json::Value,
    },
    /// A missing-person (runner) record changed.
    RunnerChanged {
        /// What happened.
        operation: ChangeOp,
        /// The affected runner record.
        runner: serde_json::Value,
    },
    /// A publicly listed case changed.
    PublicCaseChanged {
        /// What happened.
        operation: ChangeOp,
        /// The affected case.
        case: serde_json::Value,
    },
    /// A peer left a group, usually by disconnecting.
    MemberLeft {
        /// Group the peer left.
        group: String,
        /// Who left.
        principal: String,
    },
    /// Acknowledges this connection's own join request.
    GroupJoined {
        /// Group joined.
        group: String,
    },
    /// Acknowledges this connection's own leave request.
    GroupLeft {
        /// Group left.
        group: String,
    },
    /// A request over this connection failed.
    Error {
        /// Stable machine-readable code.
        code: String,
        /// Human-readable description.
        message: String,
    },
}

impl ServerEvent {
    /// The wire tag clients dispatch on.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::UserChanged { .. } => "UserChanged",
            ServerEvent::RunnerChanged { .. } => "RunnerChanged",
            ServerEvent::PublicCaseChanged { .. } => "PublicCaseChanged",
            ServerEvent::MemberLeft { .. } => "MemberLeft",
            ServerEvent::GroupJoined { .. } => "GroupJoined",
            ServerEvent::GroupLeft { .. } => "GroupLeft",
            ServerEvent::Error { .. } => "Error",
        }
    }
}
