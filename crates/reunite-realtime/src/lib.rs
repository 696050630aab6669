//! # reunite-realtime
//!
//! Real-time notification engine for Reunite. Provides:
//!
//! - An in-memory registry of live WebSocket connections
//! - Named broadcast groups with role-based admission
//! - Typed change-event fan-out with per-recipient failure isolation
//!
//! The registry, membership table, and broadcaster are plain values wired
//! together by the caller, so tests and collaborator subsystems construct
//! their own instead of reaching for process-global state.

pub mod broadcast;
pub mod connection;
pub mod group;
pub mod hub;
pub mod message;

pub use broadcast::{BroadcastReport, Broadcaster};
pub use connection::handle::{ConnectionHandle, ConnectionId, SendError};
pub use connection::registry::ConnectionRegistry;
pub use group::membership::GroupMembership;
pub use group::name::Group;
pub use hub::RealtimeHub;
pub use message::envelope::EventEnvelope;
pub use message::event::{ChangeOp, ServerEvent};
pub use message::inbound::ClientMessage;
