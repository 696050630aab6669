//! Credential and refresh-token store traits.
//!
//! The session manager talks to these traits instead of concrete
//! repositories: PostgreSQL implementations back the server, in-memory
//! implementations back the protocol tests and single-node tooling.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use reunite_core::result::AppResult;
use reunite_entity::token::RefreshToken;
use reunite_entity::user::User;

pub use memory::{MemoryCredentialStore, MemoryRefreshTokenStore};

/// Read access to persisted user credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// The refresh token rotation ledger.
///
/// Implementations must make [`RefreshTokenStore::revoke_replacing`]
/// atomic: when several callers redeem the same token concurrently, at
/// most one may observe `true`.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Record a freshly issued token.
    async fn insert(&self, token: &RefreshToken) -> AppResult<()>;

    /// Look up a token row by its opaque value.
    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Atomically revoke an active token in favor of its successor.
    /// Returns `false` when the token was already revoked or expired.
    async fn revoke_replacing(&self, token: &str, successor: &str) -> AppResult<bool>;

    /// Revoke a token without a successor. Returns whether a row changed.
    async fn revoke(&self, token: &str) -> AppResult<bool>;

    /// Revoke every active token a user holds. Returns how many changed.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64>;
}
