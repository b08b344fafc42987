//! Authentication service orchestrating verification, users and tokens

use std::sync::Arc;

use tracing::info;
use wm_shared::utils::phone::{mask_phone_number, normalize_phone_number};

use crate::domain::entities::auth_request::AuthRequest;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{LoginOutcome, LoginSession};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use crate::services::token::TokenService;
use crate::services::verification::{SmsSender, VerificationService};

use super::google::{GoogleProfile, GoogleTokenVerifier};

/// Orchestrates the authentication flows end to end
pub struct AuthService<U, A, S, T, G>
where
    U: UserRepository,
    A: AuthRequestRepository,
    S: SmsSender,
    T: TokenRepository,
    G: GoogleTokenVerifier,
{
    users: Arc<U>,
    verification: VerificationService<A, S>,
    tokens: Arc<TokenService<T>>,
    google: Arc<G>,
}

impl<U, A, S, T, G> AuthService<U, A, S, T, G>
where
    U: UserRepository,
    A: AuthRequestRepository,
    S: SmsSender,
    T: TokenRepository,
    G: GoogleTokenVerifier,
{
    pub fn new(
        users: Arc<U>,
        verification: VerificationService<A, S>,
        tokens: Arc<TokenService<T>>,
        google: Arc<G>,
    ) -> Self {
        Self {
            users,
            verification,
            tokens,
            google,
        }
    }

    /// Issues a verification code for a phone number
    pub async fn request_verification(&self, phone_number: &str) -> DomainResult<AuthRequest> {
        self.verification.request_code(phone_number).await
    }

    /// Verifies a phone code. When the phone belongs to an existing
    /// account the caller is logged in; otherwise they must sign up.
    pub async fn verify_phone(&self, phone_number: &str, code: &str) -> DomainResult<LoginOutcome> {
        self.verification.verify_code(phone_number, code).await?;

        let phone = normalize_phone_number(phone_number);
        match self.users.find_by_phone(&phone).await? {
            Some(user) => {
                let session = self.login(user).await?;
                Ok(LoginOutcome::LoggedIn(session))
            }
            None => Ok(LoginOutcome::NeedsSignup { phone_number: phone }),
        }
    }

    /// Completes signup for a verified phone number.
    ///
    /// If the phone already belongs to an account the existing account is
    /// logged in instead and `true` is returned in the second tuple slot
    /// only for a freshly created account.
    pub async fn signup(
        &self,
        phone_number: &str,
        username: &str,
        email: Option<String>,
    ) -> DomainResult<(LoginSession, bool)> {
        let phone = normalize_phone_number(phone_number);

        if let Some(existing) = self.users.find_by_phone(&phone).await? {
            let session = self.login(existing).await?;
            return Ok((session, false));
        }

        if self.users.exists_by_username(username).await? {
            return Err(AuthError::UsernameTaken {
                username: username.to_string(),
            }
            .into());
        }

        let user = User::new_phone(phone.clone(), Some(username.to_string()), email);
        let user = self.users.create(user).await?;

        info!(
            phone = %mask_phone_number(&phone),
            "new account registered"
        );

        let session = self.login(user).await?;
        Ok((session, true))
    }

    /// Signs in with a Google ID token, creating an account on first use.
    /// The flag reports whether a new account was registered.
    pub async fn google_sign_in(&self, id_token: &str) -> DomainResult<(LoginSession, bool)> {
        let profile = self.google.verify_id_token(id_token).await?;

        let (user, created) = match self.users.find_by_email(&profile.email).await? {
            Some(user) => (user, false),
            None => (self.register_google_user(&profile).await?, true),
        };

        let session = self.login(user).await?;
        Ok((session, created))
    }

    async fn register_google_user(&self, profile: &GoogleProfile) -> DomainResult<User> {
        let mut username = profile.default_username();
        // A name collision must not block the sign-in
        if self.users.exists_by_username(&username).await? {
            let suffix = &uuid::Uuid::new_v4().simple().to_string()[..4];
            username = format!("{username}{suffix}");
        }

        let user = User::new_google(profile.email.clone(), username, profile.picture.clone());
        let user = self.users.create(user).await?;

        info!(email = %user.email.as_deref().unwrap_or(""), "google account registered");
        Ok(user)
    }

    /// Exchanges a refresh token for a rotated token pair
    pub async fn refresh_session(&self, refresh_token: &str) -> DomainResult<LoginSession> {
        let user_id = self.tokens.refresh_token_owner(refresh_token).await?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }

        let pair = self.tokens.refresh_tokens(refresh_token, &user).await?;
        Ok(LoginSession::new(&user, false, pair))
    }

    /// Revokes every refresh token the user holds
    pub async fn logout(&self, user_id: uuid::Uuid) -> DomainResult<u64> {
        let revoked = self.tokens.revoke_all_tokens(user_id).await?;
        info!(%user_id, revoked, "user logged out");
        Ok(revoked)
    }

    /// Deletes the account and revokes all of its tokens
    pub async fn leave(&self, user_id: uuid::Uuid) -> DomainResult<()> {
        self.tokens.revoke_all_tokens(user_id).await?;

        let removed = self.users.delete(user_id).await?;
        if !removed {
            return Err(AuthError::UserNotFound.into());
        }

        info!(%user_id, "account deleted");
        Ok(())
    }

    /// Records the login and issues tokens.
    ///
    /// `first_login` is decided before the login timestamp is touched so
    /// the very first session reports it as true exactly once.
    async fn login(&self, mut user: User) -> DomainResult<LoginSession> {
        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }

        let first_login = user.is_first_login();
        user.update_last_login();
        let user = self.users.update(user).await?;

        let pair = self.tokens.generate_tokens(&user).await?;
        Ok(LoginSession::new(&user, first_login, pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wm_shared::config::{JwtConfig, VerificationConfig};

    use crate::errors::DomainError;
    use crate::repositories::{
        MockAuthRequestRepository, MockTokenRepository, MockUserRepository,
    };
    use crate::services::auth::google::MockGoogleVerifier;

    struct NoopSms;

    #[async_trait]
    impl SmsSender for NoopSms {
        async fn send_verification_code(
            &self,
            _phone_number: &str,
            _code: &str,
        ) -> Result<String, DomainError> {
            Ok("msg-1".to_string())
        }
    }

    type TestAuthService = AuthService<
        MockUserRepository,
        MockAuthRequestRepository,
        NoopSms,
        MockTokenRepository,
        MockGoogleVerifier,
    >;

    fn google_profile() -> GoogleProfile {
        GoogleProfile {
            email: "kim@example.com".to_string(),
            given_name: Some("Gil Dong".to_string()),
            family_name: Some("Kim".to_string()),
            picture: Some("https://example.com/p.jpg".to_string()),
        }
    }

    fn test_service() -> (TestAuthService, Arc<MockUserRepository>) {
        let users = Arc::new(MockUserRepository::new());
        let verification = VerificationService::new(
            Arc::new(MockAuthRequestRepository::new()),
            Arc::new(NoopSms),
            VerificationConfig::default(),
        );
        let tokens = Arc::new(TokenService::new(
            Arc::new(MockTokenRepository::new()),
            JwtConfig {
                secret: "test-secret-at-least-32-characters-long".to_string(),
                ..JwtConfig::default()
            },
        ));
        let google = Arc::new(MockGoogleVerifier::new("good-token", google_profile()));

        let service = AuthService::new(Arc::clone(&users), verification, tokens, google);
        (service, users)
    }

    #[tokio::test]
    async fn test_verify_phone_unknown_number_needs_signup() {
        let (svc, _) = test_service();
        let request = svc.request_verification("01012345678").await.unwrap();

        let outcome = svc
            .verify_phone("01012345678", &request.auth_number)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            LoginOutcome::NeedsSignup { ref phone_number } if phone_number == "01012345678"
        ));
    }

    #[tokio::test]
    async fn test_verify_phone_existing_user_logs_in() {
        let (svc, users) = test_service();
        users
            .insert(User::new_phone(
                "01012345678".to_string(),
                Some("waffle".to_string()),
                None,
            ))
            .await;

        let request = svc.request_verification("01012345678").await.unwrap();
        let outcome = svc
            .verify_phone("01012345678", &request.auth_number)
            .await
            .unwrap();

        match outcome {
            LoginOutcome::LoggedIn(session) => {
                assert_eq!(session.username.as_deref(), Some("waffle"));
                assert!(session.first_login);
                assert!(!session.tokens.access_token.is_empty());
            }
            LoginOutcome::NeedsSignup { .. } => panic!("expected login"),
        }
    }

    #[tokio::test]
    async fn test_signup_creates_account() {
        let (svc, users) = test_service();

        let (session, created) = svc
            .signup("01012345678", "waffle", Some("w@example.com".to_string()))
            .await
            .unwrap();

        assert!(created);
        assert!(session.first_login);
        assert_eq!(session.username.as_deref(), Some("waffle"));
        assert_eq!(users.count().await, 1);
    }

    #[tokio::test]
    async fn test_signup_existing_phone_logs_in_instead() {
        let (svc, _) = test_service();
        svc.signup("01012345678", "waffle", None).await.unwrap();

        let (session, created) = svc.signup("01012345678", "other", None).await.unwrap();

        assert!(!created);
        // The original account wins; the new username is ignored
        assert_eq!(session.username.as_deref(), Some("waffle"));
        assert!(!session.first_login);
    }

    #[tokio::test]
    async fn test_signup_username_taken() {
        let (svc, _) = test_service();
        svc.signup("01012345678", "waffle", None).await.unwrap();

        let result = svc.signup("01087654321", "waffle", None).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::UsernameTaken { .. }))
        ));
    }

    #[tokio::test]
    async fn test_google_sign_in_registers_then_reuses_account() {
        let (svc, users) = test_service();

        let (first, created) = svc.google_sign_in("good-token").await.unwrap();
        assert!(created);
        assert!(first.first_login);
        assert_eq!(first.username.as_deref(), Some("KimGilDong"));
        assert_eq!(first.email.as_deref(), Some("kim@example.com"));

        let (second, created) = svc.google_sign_in("good-token").await.unwrap();
        assert!(!created);
        assert!(!second.first_login);
        assert_eq!(users.count().await, 1);
    }

    #[tokio::test]
    async fn test_google_sign_in_bad_token() {
        let (svc, _) = test_service();
        let result = svc.google_sign_in("bad-token").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::OAuthVerificationFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_refresh_session() {
        let (svc, _) = test_service();
        let (session, _) = svc.signup("01012345678", "waffle", None).await.unwrap();

        let refreshed = svc
            .refresh_session(&session.tokens.refresh_token)
            .await
            .unwrap();

        assert!(!refreshed.first_login);
        assert_ne!(
            refreshed.tokens.refresh_token,
            session.tokens.refresh_token
        );
    }

    #[tokio::test]
    async fn test_logout_blocks_refresh() {
        let (svc, users) = test_service();
        let (session, _) = svc.signup("01012345678", "waffle", None).await.unwrap();

        let user = users.find_by_phone("01012345678").await.unwrap().unwrap();
        svc.logout(user.id).await.unwrap();

        let result = svc.refresh_session(&session.tokens.refresh_token).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_leave_deletes_account() {
        let (svc, users) = test_service();
        svc.signup("01012345678", "waffle", None).await.unwrap();

        let user = users.find_by_phone("01012345678").await.unwrap().unwrap();
        svc.leave(user.id).await.unwrap();

        assert_eq!(users.count().await, 0);
        assert!(matches!(
            svc.leave(user.id).await,
            Err(DomainError::Auth(AuthError::UserNotFound))
        ));
    }
}
