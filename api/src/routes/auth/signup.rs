//! Handler for POST /api/v1/auth/signup

use actix_web::{web, HttpResponse};
use validator::Validate;

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::auth::{LoginResponse, SignupRequest};
use crate::error::{validation_failed, ApiError};
use crate::routes::AppState;

/// Completes registration for a verified phone number.
///
/// Returns 201 with the session payload for a freshly created account.
/// If the phone is already registered the existing account is logged in
/// and 200 is returned instead.
pub async fn signup<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    request.validate().map_err(|e| validation_failed(&e))?;

    let body = request.into_inner();
    let (session, created) = state
        .auth_service
        .signup(&body.phone_number, &body.username, body.email)
        .await?;

    let payload = LoginResponse::from(session);
    if created {
        Ok(HttpResponse::Created().json(payload))
    } else {
        Ok(HttpResponse::Ok().json(payload))
    }
}
