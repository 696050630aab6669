//! Group membership table — which connections belong to which groups.

use std::collections::{HashMap, HashSet};

use tokio::sync::Mutex;

use crate::connection::handle::ConnectionId;

/// Forward and reverse membership indexes, updated together.
#[derive(Debug, Default)]
struct MembershipState {
    /// Group name → member connection IDs.
    members: HashMap<String, HashSet<ConnectionId>>,
    /// Connection ID → group names it belongs to.
    joined: HashMap<ConnectionId, HashSet<String>>,
}

impl MembershipState {
    /// Drops a connection from one group's member set, pruning the group
    /// once empty. Returns whether the connection was a member.
    fn remove_member(&mut self, group: &str, conn_id: ConnectionId) -> bool {
        let (was_member, now_empty) = match self.members.get_mut(group) {
            Some(members) => (members.remove(&conn_id), members.is_empty()),
            None => (false, false),
        };
        if now_empty {
            self.members.remove(group);
        }
        was_member
    }
}

/// Tracks group membership for live connections.
///
/// Both indexes live under one lock so join, leave, and disconnect are
/// each a single critical section; a reader never observes a connection
/// present in one index and absent from the other.
#[derive(Debug, Default)]
pub struct GroupMembership {
    state: Mutex<MembershipState>,
}

impl GroupMembership {
    /// Creates an empty membership table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a group. Returns `false` when it was already
    /// a member; joining twice is a side-effect-free repeat.
    pub async fn join(&self, conn_id: ConnectionId, group: &str) -> bool {
        let mut state = self.state.lock().await;
        let newly_added = state
            .members
            .entry(group.to_string())
            .or_default()
            .insert(conn_id);
        state
            .joined
            .entry(conn_id)
            .or_default()
            .insert(group.to_string());
        newly_added
    }

    /// Removes a connection from a group. Returns `false` when it was not
    /// a member; leaving a group never joined is a no-op, not an error.
    pub async fn leave(&self, conn_id: ConnectionId, group: &str) -> bool {
        let mut state = self.state.lock().await;
        let was_member = state.remove_member(group, conn_id);
        let now_empty = match state.joined.get_mut(&conn_id) {
            Some(groups) => {
                groups.remove(group);
                groups.is_empty()
            }
            None => false,
        };
        if now_empty {
            state.joined.remove(&conn_id);
        }
        was_member
    }

    /// Removes a connection from every group it belonged to, returning
    /// the names of its former groups.
    pub async fn remove_connection(&self, conn_id: ConnectionId) -> Vec<String> {
        let mut state = self.state.lock().await;
        let groups = state.joined.remove(&conn_id).unwrap_or_default();
        for group in &groups {
            state.remove_member(group, conn_id);
        }
        groups.into_iter().collect()
    }

    /// Snapshot of a group's member connection IDs.
    pub async fn members_of(&self, group: &str) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .members
            .get(group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Snapshot of the groups a connection belongs to.
    pub async fn groups_of(&self, conn_id: ConnectionId) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .joined
            .get(&conn_id)
            .map(|groups| groups.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of connections a group currently has.
    pub async fn member_count(&self, group: &str) -> usize {
        let state = self.state.lock().await;
        state.members.get(group).map(HashSet::len).unwrap_or(0)
    }

    /// Number of groups a connection currently belongs to.
    pub async fn group_count(&self, conn_id: ConnectionId) -> usize {
        let state = self.state.lock().await;
        state.joined.get(&conn_id).map(HashSet::len).unwrap_or(0)
    }
}
