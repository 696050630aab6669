//! In-memory store implementations using a Tokio mutex.
//!
//! These back the protocol tests and are suitable for single-node
//! experiments. The mutex gives [`MemoryRefreshTokenStore::revoke_replacing`]
//! the same at-most-one-winner semantics as the guarded UPDATE in the
//! PostgreSQL implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use reunite_core::result::AppResult;
use reunite_entity::token::RefreshToken;
use reunite_entity::user::User;

use super::{CredentialStore, RefreshTokenStore};

/// In-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub async fn put_user(&self, user: User) {
        self.users.lock().await.insert(user.id, user);
    }

    /// Flips the disabled flag on an existing user.
    pub async fn set_disabled(&self, id: Uuid, disabled: bool) {
        if let Some(user) = self.users.lock().await.get_mut(&id) {
            user.disabled = disabled;
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }
}

/// In-memory refresh token ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenStore {
    tokens: Arc<Mutex<HashMap<String, RefreshToken>>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn insert(&self, token: &RefreshToken) -> AppResult<()> {
        self.tokens
            .lock()
            .await
            .insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.lock().await.get(token).cloned())
    }

    async fn revoke_replacing(&self, token: &str, successor: &str) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().await;
        match tokens.get_mut(token) {
            Some(row) if row.is_active() => {
                row.revoked_at = Some(Utc::now());
                row.replaced_by_token = Some(successor.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke(&self, token: &str) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().await;
        match tokens.get_mut(token) {
            Some(row) if !row.is_revoked() => {
                row.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().await;
        let mut revoked = 0;
        for row in tokens.values_mut() {
            if row.user_id == user_id && !row.is_revoked() {
                row.revoked_at = Some(Utc::now());
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
