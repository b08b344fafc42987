//! Token repository trait defining the interface for refresh token persistence.
//!
//! Refresh tokens are stored hashed; the plaintext value never reaches
//! the repository. Expired tokens should be periodically cleaned up.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke a single token by ID, returning whether it was found
    async fn revoke_token(&self, token_id: Uuid) -> Result<bool, DomainError>;

    /// Revoke every token belonging to a user, returning the count revoked
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Remove expired tokens, returning the number deleted
    async fn delete_expired_tokens(&self) -> Result<u64, DomainError>;
}
