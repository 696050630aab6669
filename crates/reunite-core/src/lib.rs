//! # reunite-core
//!
//! Core crate for the Reunite case-management service. Contains the
//! configuration schemas, pagination types, and the unified error system
//! shared by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Reunite crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
