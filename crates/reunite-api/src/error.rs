//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl itself lives in `reunite-core` next to
//! `AppError` (the orphan rule requires the impl in the defining crate);
//! this module re-exports the response body type.

pub use reunite_core::error::ApiErrorResponse;
