//! Core type definitions used across the Reunite workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
