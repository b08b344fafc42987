//! Verification code configuration

use serde::{Deserialize, Serialize};

/// Configuration for SMS verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,

    /// Maximum number of verification attempts allowed per code
    pub max_attempts: i32,

    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 5,
            max_attempts: 3,
            resend_cooldown_seconds: 60,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiration_minutes: std::env::var("VERIFICATION_CODE_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_expiration_minutes),
            max_attempts: std::env::var("VERIFICATION_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
            resend_cooldown_seconds: std::env::var("VERIFICATION_RESEND_COOLDOWN_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.resend_cooldown_seconds),
        }
    }
}
