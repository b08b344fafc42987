//! Handler for POST /api/v1/auth/refresh

use actix_web::{web, HttpResponse};
use validator::Validate;

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::auth::{LoginResponse, RefreshTokenRequest};
use crate::error::{validation_failed, ApiError};
use crate::routes::AppState;

/// Exchanges a refresh token for a rotated token pair
pub async fn refresh<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    request.validate().map_err(|e| validation_failed(&e))?;

    let session = state
        .auth_service
        .refresh_session(&request.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse::from(session)))
}
