//! Real-time notification configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound message buffer size per connection. A connection that
    /// cannot drain this many messages is treated as failed for the
    /// affected sends.
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer_size: usize,
    /// Maximum group memberships per connection.
    #[serde(default = "default_max_groups")]
    pub max_groups_per_connection: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            outbound_buffer_size: default_outbound_buffer(),
            max_groups_per_connection: default_max_groups(),
        }
    }
}

fn default_outbound_buffer() -> usize {
    256
}

fn default_max_groups() -> usize {
    32
}
