//! Handlers for POST and PUT /api/v1/auth/phone

use actix_web::{web, HttpResponse};
use validator::Validate;

use wm_core::domain::value_objects::LoginOutcome;
use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::auth::{
    LoginResponse, RequestCodeRequest, RequestCodeResponse, VerifiedResponse, VerifyCodeRequest,
};
use crate::error::{validation_failed, ApiError};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/phone
///
/// Issues a verification code for the phone number and sends it via SMS.
/// The code is echoed in the response so development clients can
/// auto-fill it.
pub async fn request_code<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    request: web::Json<RequestCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    request.validate().map_err(|e| validation_failed(&e))?;

    let issued = state
        .auth_service
        .request_verification(&request.phone_number)
        .await?;

    Ok(HttpResponse::Ok().json(RequestCodeResponse {
        phone_number: issued.phone_number,
        auth_number: issued.auth_number,
    }))
}

/// Handler for PUT /api/v1/auth/phone
///
/// Verifies the submitted code. A phone that maps to an existing account
/// is logged in and receives the full session payload; otherwise the
/// response only confirms the verification so the client can proceed to
/// signup.
pub async fn verify_code<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    request.validate().map_err(|e| validation_failed(&e))?;

    let outcome = state
        .auth_service
        .verify_phone(&request.phone_number, &request.auth_number)
        .await?;

    match outcome {
        LoginOutcome::LoggedIn(session) => {
            Ok(HttpResponse::Ok().json(LoginResponse::from(session)))
        }
        LoginOutcome::NeedsSignup { phone_number } => {
            Ok(HttpResponse::Ok().json(VerifiedResponse {
                authenticated: true,
                phone_number,
            }))
        }
    }
}
