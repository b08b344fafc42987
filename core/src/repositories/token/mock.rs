//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::trait_::TokenRepository;

/// Mock token repository backed by an in-memory map
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored tokens (revoked ones included)
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn revoke_token(&self, token_id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(&token_id) {
            Some(token) => {
                token.revoke();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut revoked = 0;
        for token in tokens.values_mut() {
            if token.user_id == user_id && !token.is_revoked {
                token.revoke();
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired_tokens(&self) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired());
        Ok((before - tokens.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find_by_hash() {
        let repo = MockTokenRepository::new();
        let token = RefreshToken::new(Uuid::new_v4(), "abc123".to_string());
        repo.save_refresh_token(token.clone()).await.unwrap();

        let found = repo.find_refresh_token("abc123").await.unwrap().unwrap();
        assert_eq!(found.id, token.id);
    }

    #[tokio::test]
    async fn test_revoke_all_user_tokens() {
        let repo = MockTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save_refresh_token(RefreshToken::new(user_id, "a".to_string()))
            .await
            .unwrap();
        repo.save_refresh_token(RefreshToken::new(user_id, "b".to_string()))
            .await
            .unwrap();
        repo.save_refresh_token(RefreshToken::new(Uuid::new_v4(), "c".to_string()))
            .await
            .unwrap();

        let revoked = repo.revoke_all_user_tokens(user_id).await.unwrap();
        assert_eq!(revoked, 2);

        let other = repo.find_refresh_token("c").await.unwrap().unwrap();
        assert!(!other.is_revoked);
    }
}
