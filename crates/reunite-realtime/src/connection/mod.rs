//! Live connection handles and the registry that tracks them.

pub mod handle;
pub mod registry;

pub use handle::{ConnectionHandle, ConnectionId, SendError};
pub use registry::ConnectionRegistry;
