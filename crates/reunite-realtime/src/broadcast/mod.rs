//! Group fan-out of enveloped events.

pub mod broadcaster;

pub use broadcaster::{BroadcastReport, Broadcaster};
