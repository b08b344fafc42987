//! Trait for SMS gateway integration

use async_trait::async_trait;

use crate::errors::DomainError;

/// Outbound SMS gateway
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a verification code to a phone number, returning a
    /// provider-assigned message identifier.
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, DomainError>;
}
