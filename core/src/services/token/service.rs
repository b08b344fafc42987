//! Main token service implementation

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use wm_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

/// Service for managing JWT access tokens and refresh tokens
///
/// Access tokens are HS256-signed JWTs; refresh tokens are opaque random
/// strings stored hashed and rotated on every refresh.
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    pub fn new(repository: Arc<R>, config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    pub async fn generate_tokens(&self, user: &User) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = self.generate_refresh_token(user.id).await?;

        let mut pair = TokenPair::new(access_token, refresh_token);
        pair.expires_in = self.config.access_token_expiry;
        Ok(pair)
    }

    /// Generates an access token for a user
    fn generate_access_token(&self, user: &User) -> Result<String, DomainError> {
        let mut claims = Claims::new_access_token(user.id, user.username.clone(), user.is_active);
        claims.exp = claims.iat + self.config.access_token_expiry;
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
        self.encode_jwt(&claims)
    }

    /// Generates a refresh token, stores its hash, and returns the plaintext
    async fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let mut rng = rand::thread_rng();
        let token_string: String = (0..32)
            .map(|_| {
                let idx = rng.gen_range(0..62);
                match idx {
                    0..10 => (b'0' + idx) as char,
                    10..36 => (b'a' + idx - 10) as char,
                    36..62 => (b'A' + idx - 36) as char,
                    _ => unreachable!(),
                }
            })
            .collect();

        let token_hash = Self::hash_token(&token_string);
        let refresh_token = RefreshToken::new(user_id, token_hash);

        self.repository
            .save_refresh_token(refresh_token)
            .await
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(token_string)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verifies a refresh token and returns the stored record
    async fn verify_refresh_token(&self, token: &str) -> Result<RefreshToken, DomainError> {
        let token_hash = Self::hash_token(token);

        let refresh_token = self
            .repository
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if refresh_token.is_expired() {
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }
        if refresh_token.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(refresh_token)
    }

    /// Exchanges a refresh token for a new token pair, rotating the
    /// refresh token so each one can be used exactly once.
    pub async fn refresh_tokens(
        &self,
        refresh_token: &str,
        user: &User,
    ) -> Result<TokenPair, DomainError> {
        let old_token = self.verify_refresh_token(refresh_token).await?;

        if old_token.user_id != user.id {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        let access_token = self.generate_access_token(user)?;
        let new_refresh_token = self.generate_refresh_token(user.id).await?;

        self.repository.revoke_token(old_token.id).await?;

        let mut pair = TokenPair::new(access_token, new_refresh_token);
        pair.expires_in = self.config.access_token_expiry;
        Ok(pair)
    }

    /// Resolves the owning user ID for a refresh token without rotating it
    pub async fn refresh_token_owner(&self, refresh_token: &str) -> Result<Uuid, DomainError> {
        let token = self.verify_refresh_token(refresh_token).await?;
        Ok(token.user_id)
    }

    /// Revokes every refresh token belonging to a user
    pub async fn revoke_all_tokens(&self, user_id: Uuid) -> Result<u64, DomainError> {
        self.repository.revoke_all_user_tokens(user_id).await
    }

    /// SHA-256 hex digest used for refresh token storage
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repositories::MockTokenRepository;

    fn test_service() -> TokenService<MockTokenRepository> {
        let config = JwtConfig {
            secret: "test-secret-at-least-32-characters-long".to_string(),
            ..JwtConfig::default()
        };
        TokenService::new(Arc::new(MockTokenRepository::new()), config)
    }

    fn test_user() -> User {
        User::new_phone(
            "01012345678".to_string(),
            Some("waffle".to_string()),
            None,
        )
    }

    #[tokio::test]
    async fn test_generate_and_verify_access_token() {
        let svc = test_service();
        let user = test_user();

        let pair = svc.generate_tokens(&user).await.unwrap();
        let claims = svc.verify_access_token(&pair.access_token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username.as_deref(), Some("waffle"));
        assert!(claims.is_active);
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let svc = test_service();
        let user = test_user();

        let pair = svc.generate_tokens(&user).await.unwrap();
        let mut tampered = pair.access_token.clone();
        tampered.push('x');

        assert!(svc.verify_access_token(&tampered).is_err());
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let svc = test_service();
        let user = test_user();

        let pair = svc.generate_tokens(&user).await.unwrap();
        let new_pair = svc.refresh_tokens(&pair.refresh_token, &user).await.unwrap();

        assert_ne!(pair.refresh_token, new_pair.refresh_token);

        // The old refresh token must be unusable after rotation
        let reuse = svc.refresh_tokens(&pair.refresh_token, &user).await;
        assert!(matches!(
            reuse,
            Err(DomainError::Token(TokenError::TokenRevoked))
        ));
    }

    #[tokio::test]
    async fn test_refresh_with_unknown_token() {
        let svc = test_service();
        let user = test_user();

        let result = svc.refresh_tokens("no-such-token", &user).await;
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::InvalidRefreshToken))
        ));
    }

    #[tokio::test]
    async fn test_revoke_all_blocks_refresh() {
        let svc = test_service();
        let user = test_user();

        let pair = svc.generate_tokens(&user).await.unwrap();
        let revoked = svc.revoke_all_tokens(user.id).await.unwrap();
        assert_eq!(revoked, 1);

        let result = svc.refresh_tokens(&pair.refresh_token, &user).await;
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::TokenRevoked))
        ));
    }

    #[test]
    fn test_hash_token_is_hex_sha256() {
        let hash = TokenService::<MockTokenRepository>::hash_token("hello");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
