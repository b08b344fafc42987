//! Handlers for GET and PUT /api/v1/user/me

use actix_web::{web, HttpResponse};
use validator::Validate;

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::user::{ProfileResponse, UpdateProfileRequest};
use crate::error::{validation_failed, ApiError};
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Returns the authenticated user's profile
pub async fn get_profile<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    let user = state.profile_service.get_profile(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}

/// Applies partial updates to the authenticated user's profile
pub async fn update_profile<U, A, S, T, G>(
    state: web::Data<AppState<U, A, S, T, G>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
    let user = state
        .profile_service
        .update_profile(auth.user_id, body.username, body.profile_image)
        .await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}
