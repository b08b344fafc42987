//! Handler for POST /api/v1/auth/logout

use actix_web::{web, HttpResponse};

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;

use crate::dto::auth::LogoutResponse;
use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Revokes every refresh token the authenticated user holds
pub async fn logout<U, A, S, T, G>(
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
    let revoked = state.auth_service.logout(auth.user_id).await?;
    log::debug!("logout revoked {} refresh token(s)", revoked);

    Ok(HttpResponse::Ok().json(LogoutResponse { logined: false }))
}
