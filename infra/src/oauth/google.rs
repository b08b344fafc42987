//! Google ID token verification against the tokeninfo endpoint.
//!
//! The tokeninfo endpoint validates the token signature server-side and
//! returns the claims as JSON, so no local key management is needed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use wm_shared::config::GoogleConfig;

use wm_core::errors::{AuthError, DomainError};
use wm_core::services::auth::{GoogleProfile, GoogleTokenVerifier};

/// Claims returned by the Google tokeninfo endpoint
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: Option<String>,
    email: Option<String>,
    // tokeninfo serializes booleans as strings
    email_verified: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

/// Verifies Google ID tokens via the HTTPS tokeninfo endpoint
pub struct GoogleTokenInfoVerifier {
    client: Client,
    config: GoogleConfig,
}

impl GoogleTokenInfoVerifier {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn failure(reason: impl Into<String>) -> DomainError {
        AuthError::OAuthVerificationFailed {
            reason: reason.into(),
        }
        .into()
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleTokenInfoVerifier {
    async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile, DomainError> {
        let response = self
            .client
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "tokeninfo request failed");
                Self::failure("tokeninfo endpoint unreachable")
            })?;

        if !response.status().is_success() {
            return Err(Self::failure(format!(
                "tokeninfo rejected the token (status {})",
                response.status()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|_| Self::failure("malformed tokeninfo response"))?;

        if !self.config.client_id.is_empty() {
            match info.aud.as_deref() {
                Some(aud) if aud == self.config.client_id => {}
                _ => return Err(Self::failure("audience mismatch")),
            }
        }

        if info.email_verified.as_deref() != Some("true") {
            return Err(Self::failure("email not verified"));
        }

        let email = info
            .email
            .ok_or_else(|| Self::failure("token carries no email claim"))?;

        Ok(GoogleProfile {
            email,
            given_name: info.given_name,
            family_name: info.family_name,
            picture: info.picture,
        })
    }
}
