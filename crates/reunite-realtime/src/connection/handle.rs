//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use reunite_entity::user::UserRole;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// Why a send to a connection did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The client went away; the handle is marked dead.
    #[error("connection closed")]
    Closed,
    /// The outbound buffer is full; the message was dropped.
    #[error("outbound buffer full")]
    Backpressure,
}

/// A handle to a single live connection.
///
/// Holds the sender half of the connection's outbound queue plus the
/// identity the access token carried at upgrade time. Messages pushed
/// through one handle reach the client in push order; the queue is the
/// only path to the socket.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Who is connected, normally an email address.
    pub principal: String,
    /// Roles carried by the access token (cached for admission checks).
    pub roles: Vec<UserRole>,
    /// Sender for outbound message text.
    pub sender: mpsc::Sender<String>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a handle for a freshly upgraded connection.
    pub fn new(principal: String, roles: Vec<UserRole>, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal,
            roles,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Queues a message for this connection.
    ///
    /// A closed receiver marks the handle dead so later sends fail fast;
    /// a full buffer drops the message rather than blocking the caller.
    pub fn send(&self, text: String) -> Result<(), SendError> {
        if !self.is_alive() {
            return Err(SendError::Closed);
        }
        match self.sender.try_send(text) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(SendError::Backpressure),
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                Err(SendError::Closed)
            }
        }
    }

    /// Whether the connection is still alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Whether the connected principal carries the given role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }
}
