//! Handler for DELETE /api/v1/user

use actix_web::{web, HttpResponse};

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::user::LeaveResponse;
use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Permanently deletes the authenticated user's account and revokes
/// all of its sessions
pub async fn leave<U, A, S, T, G>(
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
    state.auth_service.leave(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(LeaveResponse { leaved: true }))
}
