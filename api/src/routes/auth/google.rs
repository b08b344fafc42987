//! Handler for POST /api/v1/auth/google

use actix_web::{web, HttpResponse};
use validator::Validate;

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::auth::{GoogleSignInRequest, LoginResponse};
use crate::error::{validation_failed, ApiError};
use crate::routes::AppState;

/// Signs in with a Google ID token, creating the account on first use
pub async fn google_sign_in<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    request: web::Json<GoogleSignInRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    request.validate().map_err(|e| validation_failed(&e))?;

    let (session, created) = state.auth_service.google_sign_in(&request.token).await?;

    let body = LoginResponse::from(session);
    if created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}
