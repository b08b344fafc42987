//! Route handlers and shared application state

pub mod auth;
pub mod user;

use std::sync::Arc;

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::{AuthService, GoogleTokenVerifier};
use wm_core::services::profile::ProfileService;
use wm_core::services::verification::SmsSender;

/// Application state that holds the shared services
pub struct AppState<U, A, S, T, G>
where
    U: UserRepository,
    A: AuthRequestRepository,
    S: SmsSender,
    T: TokenRepository,
    G: GoogleTokenVerifier,
{
    pub auth_service: Arc<AuthService<U, A, S, T, G>>,
    pub profile_service: Arc<ProfileService<U>>,
}
