//! Route handlers organized by domain.

pub mod auth;
pub mod health;
pub mod notify;
pub mod users;
pub mod ws;
