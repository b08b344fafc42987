//! Verification code workflow implementation

use std::sync::Arc;

use tracing::{info, warn};
use wm_shared::config::VerificationConfig;
use wm_shared::utils::phone::{is_valid_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::auth_request::{AuthRequest, VerifyError, CODE_LENGTH};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AuthRequestRepository;

use super::traits::SmsSender;

/// Service coordinating verification code issuance and checking
pub struct VerificationService<A, S>
where
    A: AuthRequestRepository,
    S: SmsSender,
{
    auth_requests: Arc<A>,
    sms: Arc<S>,
    config: VerificationConfig,
}

impl<A, S> VerificationService<A, S>
where
    A: AuthRequestRepository,
    S: SmsSender,
{
    pub fn new(auth_requests: Arc<A>, sms: Arc<S>, config: VerificationConfig) -> Self {
        Self {
            auth_requests,
            sms,
            config,
        }
    }

    /// Issues a fresh verification code for a phone number and sends it
    /// via SMS. Any previous code for the phone is replaced, so only the
    /// latest code can ever be verified.
    pub async fn request_code(&self, phone_number: &str) -> DomainResult<AuthRequest> {
        let phone = normalize_phone_number(phone_number);
        if !is_valid_phone(&phone) {
            return Err(AuthError::InvalidPhoneFormat { phone }.into());
        }

        // Cooldown applies while a previous code is still active
        if let Some(existing) = self.auth_requests.find_active_by_phone(&phone).await? {
            let wait = existing.resend_available_in(self.config.resend_cooldown_seconds);
            if wait > 0 {
                warn!(
                    phone = %mask_phone_number(&phone),
                    wait_seconds = wait,
                    "verification code requested during cooldown"
                );
                return Err(AuthError::ResendCooldown { seconds: wait }.into());
            }
        }

        let request = AuthRequest::new_with_policy(
            phone.clone(),
            self.config.code_expiration_minutes,
            self.config.max_attempts,
        );

        self.sms
            .send_verification_code(&phone, &request.auth_number)
            .await?;

        let stored = self.auth_requests.replace_for_phone(request).await?;

        info!(
            phone = %mask_phone_number(&phone),
            "verification code issued"
        );

        Ok(stored)
    }

    /// Checks a submitted code against the active request for the phone.
    ///
    /// A correct code consumes the request; a wrong one charges an
    /// attempt, and the third wrong attempt exhausts the request.
    pub async fn verify_code(&self, phone_number: &str, code: &str) -> DomainResult<()> {
        let phone = normalize_phone_number(phone_number);

        // Malformed input never charges an attempt
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AuthError::InvalidVerificationCode.into());
        }

        // Expired requests are still fetched so the expiry is reported
        // instead of a generic not-found
        let mut request = self
            .auth_requests
            .find_latest_by_phone(&phone)
            .await?
            .ok_or(AuthError::VerificationNotFound)?;

        let outcome = request.verify(code);
        // Persist attempt/consumed changes before reporting the outcome
        self.auth_requests.update(request).await?;

        match outcome {
            Ok(()) => {
                info!(phone = %mask_phone_number(&phone), "phone number verified");
                Ok(())
            }
            Err(VerifyError::Expired) => Err(AuthError::VerificationCodeExpired.into()),
            Err(VerifyError::AlreadyConsumed) => Err(AuthError::VerificationNotFound.into()),
            Err(VerifyError::AttemptsExhausted) => Err(AuthError::MaxAttemptsExceeded.into()),
            Err(VerifyError::Mismatch { remaining_attempts }) => {
                warn!(
                    phone = %mask_phone_number(&phone),
                    remaining_attempts,
                    "verification code mismatch"
                );
                Err(AuthError::InvalidVerificationCode.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::errors::DomainError;
    use crate::repositories::MockAuthRequestRepository;

    struct RecordingSms {
        sent: AtomicUsize,
    }

    impl RecordingSms {
        fn new() -> Self {
            Self {
                sent: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SmsSender for RecordingSms {
        async fn send_verification_code(
            &self,
            _phone_number: &str,
            _code: &str,
        ) -> Result<String, DomainError> {
            let n = self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(format!("msg-{n}"))
        }
    }

    fn service(
    ) -> VerificationService<MockAuthRequestRepository, RecordingSms> {
        VerificationService::new(
            Arc::new(MockAuthRequestRepository::new()),
            Arc::new(RecordingSms::new()),
            VerificationConfig::default(),
        )
    }

    fn service_with(
        repo: Arc<MockAuthRequestRepository>,
        config: VerificationConfig,
    ) -> VerificationService<MockAuthRequestRepository, RecordingSms> {
        VerificationService::new(repo, Arc::new(RecordingSms::new()), config)
    }

    fn wrong_code_for(request: &AuthRequest) -> &'static str {
        if request.auth_number == "000000" {
            "000001"
        } else {
            "000000"
        }
    }

    #[tokio::test]
    async fn test_request_code_issues_six_digits() {
        let svc = service();
        let request = svc.request_code("01012345678").await.unwrap();

        assert_eq!(request.auth_number.len(), 6);
        assert!(request.auth_number.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_request_code_rejects_invalid_phone() {
        let svc = service();
        let result = svc.request_code("not-a-phone").await;

        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidPhoneFormat { .. }))
        ));
    }

    #[tokio::test]
    async fn test_resend_within_cooldown_rejected() {
        let svc = service();
        svc.request_code("01012345678").await.unwrap();

        let result = svc.request_code("01012345678").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::ResendCooldown { .. }))
        ));
    }

    #[tokio::test]
    async fn test_verify_correct_code() {
        let svc = service();
        let request = svc.request_code("01012345678").await.unwrap();

        svc.verify_code("01012345678", &request.auth_number)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_wrong_code_then_exhaustion() {
        let svc = service();
        let request = svc.request_code("01012345678").await.unwrap();
        let wrong = wrong_code_for(&request);

        for _ in 0..2 {
            let result = svc.verify_code("01012345678", wrong).await;
            assert!(matches!(
                result,
                Err(DomainError::Auth(AuthError::InvalidVerificationCode))
            ));
        }

        let result = svc.verify_code("01012345678", wrong).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
        ));
    }

    #[tokio::test]
    async fn test_expired_code_reports_expiry() {
        let repo = Arc::new(MockAuthRequestRepository::new());
        let svc = service_with(Arc::clone(&repo), VerificationConfig::default());

        let mut request = svc.request_code("01012345678").await.unwrap();
        request.expires_at = chrono::Utc::now() - chrono::Duration::seconds(1);
        repo.update(request.clone()).await.unwrap();

        let result = svc.verify_code("01012345678", &request.auth_number).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::VerificationCodeExpired))
        ));
    }

    #[tokio::test]
    async fn test_configured_attempt_limit_is_honored() {
        let repo = Arc::new(MockAuthRequestRepository::new());
        let config = VerificationConfig {
            max_attempts: 5,
            ..VerificationConfig::default()
        };
        let svc = service_with(repo, config);

        let request = svc.request_code("01012345678").await.unwrap();
        let wrong = wrong_code_for(&request);

        for _ in 0..4 {
            let result = svc.verify_code("01012345678", wrong).await;
            assert!(matches!(
                result,
                Err(DomainError::Auth(AuthError::InvalidVerificationCode))
            ));
        }

        let result = svc.verify_code("01012345678", wrong).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
        ));
    }

    #[tokio::test]
    async fn test_malformed_code_never_charges_an_attempt() {
        let svc = service();
        let request = svc.request_code("01012345678").await.unwrap();

        for bad in ["12345", "1234567", "12a456", ""] {
            let result = svc.verify_code("01012345678", bad).await;
            assert!(matches!(
                result,
                Err(DomainError::Auth(AuthError::InvalidVerificationCode))
            ));
        }

        // All attempts are still available for the real code
        svc.verify_code("01012345678", &request.auth_number)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_without_request() {
        let svc = service();
        let result = svc.verify_code("01012345678", "123456").await;

        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::VerificationNotFound))
        ));
    }

    #[tokio::test]
    async fn test_code_single_use() {
        let svc = service();
        let request = svc.request_code("01012345678").await.unwrap();
        let code = request.auth_number.clone();

        svc.verify_code("01012345678", &code).await.unwrap();

        // Mock `update` keeps the consumed row around; the lookup must no
        // longer surface it.
        let result = svc.verify_code("01012345678", &code).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::VerificationNotFound))
        ));
    }
}
