//! Messages sent by the client to the server.

use serde::{Deserialize, Serialize};

/// Requests a client may make over an open connection.
///
/// Membership does not survive reconnection, so clients re-send `join`
/// for every group they care about each time they connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join a broadcast group.
    Join {
        /// Group wire name, e.g. `Admins` or `case-17`.
        group: String,
    },
    /// Leave a broadcast group.
    Leave {
        /// Group wire name.
        group: String,
    },
}
