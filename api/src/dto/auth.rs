//! Request and response bodies for the authentication endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use wm_core::domain::value_objects::LoginSession;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    /// Phone number, either local Korean format or E.164
    #[validate(length(min = 7, max = 16))]
    pub phone_number: String,
}

/// Echoes the issued code so development clients can auto-fill it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub phone_number: String,
    pub auth_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 7, max = 16))]
    pub phone_number: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub auth_number: String,
}

/// Verification succeeded but the phone has no account yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedResponse {
    pub authenticated: bool,
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 7, max = 16))]
    pub phone_number: String,

    #[validate(length(min = 1, max = 30))]
    pub username: String,

    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GoogleSignInRequest {
    /// Google ID token obtained by the client
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Full login payload returned whenever a session is established
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub logined: bool,
    pub first_login: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        Self {
            phone_number: session.phone_number,
            email: session.email,
            username: session.username,
            logined: true,
            first_login: session.first_login,
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            expires_in: session.tokens.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub logined: bool,
}
