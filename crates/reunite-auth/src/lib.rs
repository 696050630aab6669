//! # reunite-auth
//!
//! Authentication for the Reunite platform.
//!
//! ## Modules
//!
//! - `jwt` — access token issuance and verification
//! - `password` — Argon2id password hashing
//! - `store` — credential and refresh-token store traits with in-memory
//!   and PostgreSQL implementations
//! - `session` — the login / refresh / revoke protocol over the stores

pub mod jwt;
pub mod password;
pub mod session;
pub mod store;

pub use jwt::{AccessClaims, IssuedAccessToken, TokenIssuer, TokenVerifier};
pub use password::PasswordHasher;
pub use session::{AuthenticatedSession, SessionManager};
pub use store::{CredentialStore, RefreshTokenStore};
