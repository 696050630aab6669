//! Wire message definitions for the notification socket.

pub mod envelope;
pub mod event;
pub mod inbound;

pub use envelope::EventEnvelope;
pub use event::{ChangeOp, ServerEvent};
pub use inbound::ClientMessage;
