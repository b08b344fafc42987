//! Google ID token verification port

use async_trait::async_trait;

use crate::errors::DomainError;

/// Profile claims extracted from a verified Google ID token
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleProfile {
    /// Builds the default username for a Google account: family name
    /// followed by given name, with spaces and soft hyphens removed.
    pub fn default_username(&self) -> String {
        let raw = format!(
            "{}{}",
            self.family_name.as_deref().unwrap_or(""),
            self.given_name.as_deref().unwrap_or(""),
        );
        let username: String = raw.chars().filter(|c| *c != ' ' && *c != '\u{00AD}').collect();
        if username.is_empty() {
            // Fall back to the mailbox part of the email address
            self.email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string()
        } else {
            username
        }
    }
}

/// Verifies a Google-issued ID token and returns the profile it asserts
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile, DomainError>;
}

/// Mock verifier that accepts a fixed token
pub struct MockGoogleVerifier {
    expected_token: String,
    profile: GoogleProfile,
}

impl MockGoogleVerifier {
    pub fn new(expected_token: impl Into<String>, profile: GoogleProfile) -> Self {
        Self {
            expected_token: expected_token.into(),
            profile,
        }
    }
}

#[async_trait]
impl GoogleTokenVerifier for MockGoogleVerifier {
    async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile, DomainError> {
        if id_token == self.expected_token {
            Ok(self.profile.clone())
        } else {
            Err(crate::errors::AuthError::OAuthVerificationFailed {
                reason: "token mismatch".to_string(),
            }
            .into())
        }
    }
}
