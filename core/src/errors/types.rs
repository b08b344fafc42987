//! Error type definitions for authentication, token management and validation.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("No pending verification for this phone number")]
    VerificationNotFound,

    #[error("Maximum verification attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Please wait {seconds} seconds before requesting another code")]
    ResendCooldown { seconds: i64 },

    #[error("SMS service failure")]
    SmsServiceFailure,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Username already taken: {username}")]
    UsernameTaken { username: String },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Account deactivated")]
    AccountDeactivated,

    #[error("Google token verification failed: {reason}")]
    OAuthVerificationFailed { reason: String },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: String,
        actual: String,
    },
}

impl AuthError {
    /// Stable error code used by the HTTP layer
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidPhoneFormat { .. } => "INVALID_PHONE_FORMAT",
            AuthError::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            AuthError::VerificationCodeExpired => "VERIFICATION_CODE_EXPIRED",
            AuthError::VerificationNotFound => "VERIFICATION_NOT_FOUND",
            AuthError::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            AuthError::ResendCooldown { .. } => "RESEND_COOLDOWN",
            AuthError::SmsServiceFailure => "SMS_SERVICE_FAILURE",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::UsernameTaken { .. } => "USERNAME_TAKEN",
            AuthError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            AuthError::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            AuthError::OAuthVerificationFailed { .. } => "OAUTH_VERIFICATION_FAILED",
        }
    }
}

impl TokenError {
    /// Stable error code used by the HTTP layer
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_codes() {
        assert_eq!(
            AuthError::InvalidVerificationCode.error_code(),
            "INVALID_VERIFICATION_CODE"
        );
        assert_eq!(
            AuthError::ResendCooldown { seconds: 42 }.error_code(),
            "RESEND_COOLDOWN"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AuthError::UsernameTaken {
            username: "waffle".to_string(),
        };
        assert_eq!(err.to_string(), "Username already taken: waffle");
    }
}
