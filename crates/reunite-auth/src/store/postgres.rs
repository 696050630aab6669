//! PostgreSQL-backed store implementations.
//!
//! Thin delegation onto the concrete repositories; the atomicity of
//! `revoke_replacing` lives in the repository's guarded UPDATE.

use async_trait::async_trait;
use uuid::Uuid;

use reunite_core::result::AppResult;
use reunite_database::repositories::{RefreshTokenRepository, UserRepository};
use reunite_entity::token::RefreshToken;
use reunite_entity::user::User;

use super::{CredentialStore, RefreshTokenStore};

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn insert(&self, token: &RefreshToken) -> AppResult<()> {
        RefreshTokenRepository::insert(self, token).await.map(|_| ())
    }

    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        self.find_by_token(token).await
    }

    async fn revoke_replacing(&self, token: &str, successor: &str) -> AppResult<bool> {
        RefreshTokenRepository::revoke_replacing(self, token, successor).await
    }

    async fn revoke(&self, token: &str) -> AppResult<bool> {
        RefreshTokenRepository::revoke(self, token).await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        RefreshTokenRepository::revoke_all_for_user(self, user_id).await
    }
}
