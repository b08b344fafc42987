//! Auth request repository trait for verification code persistence.

use async_trait::async_trait;

use crate::domain::entities::auth_request::AuthRequest;
use crate::errors::DomainError;

/// Repository trait for AuthRequest persistence operations
///
/// At most one active request exists per phone number; storing a new
/// request replaces any previous one for the same phone.
#[async_trait]
pub trait AuthRequestRepository: Send + Sync {
    /// Replace any existing request for this phone number with a new one
    async fn replace_for_phone(&self, request: AuthRequest) -> Result<AuthRequest, DomainError>;

    /// Find the current unconsumed, unexpired request for a phone number
    async fn find_active_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<AuthRequest>, DomainError>;

    /// Find the current unconsumed request for a phone number even when
    /// it has expired, so verification can report the expiry
    async fn find_latest_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<AuthRequest>, DomainError>;

    /// Persist attempt counter and consumed flag changes
    async fn update(&self, request: AuthRequest) -> Result<AuthRequest, DomainError>;

    /// Remove expired requests, returning the number deleted
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
