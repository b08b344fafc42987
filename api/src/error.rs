//! Mapping from domain errors to HTTP responses

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use wm_shared::types::ErrorResponse;

use wm_core::errors::{AuthError, DomainError, TokenError};

/// HTTP-facing wrapper around [`DomainError`]
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    fn error_code(&self) -> String {
        match &self.0 {
            DomainError::Auth(e) => e.error_code().to_string(),
            DomainError::Token(e) => e.error_code().to_string(),
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                "VALIDATION_ERROR".to_string()
            }
            DomainError::BusinessRule { .. } => "BUSINESS_RULE_VIOLATION".to_string(),
            DomainError::NotFound { .. } => "NOT_FOUND".to_string(),
            DomainError::Unauthorized => "UNAUTHORIZED".to_string(),
            DomainError::Internal { .. } => "INTERNAL_ERROR".to_string(),
        }
    }

    /// Message safe to surface to clients
    fn public_message(&self) -> String {
        match &self.0 {
            // Internal details stay in the logs
            DomainError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Auth(auth) => match auth {
                // A failed code check is a 400, matching the phone
                // verification endpoint's contract
                AuthError::InvalidPhoneFormat { .. }
                | AuthError::InvalidVerificationCode
                | AuthError::VerificationCodeExpired
                | AuthError::VerificationNotFound => StatusCode::BAD_REQUEST,
                AuthError::AuthenticationFailed
                | AuthError::OAuthVerificationFailed { .. } => StatusCode::UNAUTHORIZED,
                AuthError::MaxAttemptsExceeded | AuthError::ResendCooldown { .. } => {
                    StatusCode::TOO_MANY_REQUESTS
                }
                AuthError::SmsServiceFailure => StatusCode::SERVICE_UNAVAILABLE,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::UserAlreadyExists | AuthError::UsernameTaken { .. } => {
                    StatusCode::CONFLICT
                }
                AuthError::AccountDeactivated => StatusCode::FORBIDDEN,
            },
            DomainError::Token(token) => match token {
                TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::UNAUTHORIZED,
            },
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::BusinessRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {}", self.0);
        } else {
            log::warn!("request rejected: {}", self.0);
        }

        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.error_code(), self.public_message()))
    }
}

/// Converts validator output into a 400 response body
pub fn validation_failed(errors: &validator::ValidationErrors) -> ApiError {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    ApiError(DomainError::Validation {
        message: format!("Invalid fields: {}", fields.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_maps_to_429() {
        let err = ApiError(AuthError::ResendCooldown { seconds: 30 }.into());
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_internal_error_message_is_masked() {
        let err = ApiError(DomainError::Internal {
            message: "db connection string leaked".to_string(),
        });
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_expired_token_maps_to_401() {
        let err = ApiError(TokenError::TokenExpired.into());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
