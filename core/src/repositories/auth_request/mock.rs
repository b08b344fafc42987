//! Mock implementation of AuthRequestRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::auth_request::AuthRequest;
use crate::errors::DomainError;

use super::trait_::AuthRequestRepository;

/// Mock auth request repository keyed by phone number
pub struct MockAuthRequestRepository {
    requests: Arc<RwLock<HashMap<String, AuthRequest>>>,
}

impl MockAuthRequestRepository {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockAuthRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthRequestRepository for MockAuthRequestRepository {
    async fn replace_for_phone(&self, request: AuthRequest) -> Result<AuthRequest, DomainError> {
        let mut requests = self.requests.write().await;
        requests.insert(request.phone_number.clone(), request.clone());
        Ok(request)
    }

    async fn find_active_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<AuthRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .get(phone_number)
            .filter(|r| r.is_active())
            .cloned())
    }

    async fn find_latest_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<AuthRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .get(phone_number)
            .filter(|r| !r.consumed)
            .cloned())
    }

    async fn update(&self, request: AuthRequest) -> Result<AuthRequest, DomainError> {
        let mut requests = self.requests.write().await;

        if !requests.contains_key(&request.phone_number) {
            return Err(DomainError::NotFound {
                resource: "AuthRequest".to_string(),
            });
        }

        requests.insert(request.phone_number.clone(), request.clone());
        Ok(request)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|_, r| !r.is_expired());
        Ok((before - requests.len()) as u64)
    }
}
