//! Application state and factory
//!
//! Initializes the Actix-web application with all routes and middleware.
//! The factory is generic over the repository and gateway implementations
//! so integration tests can drive the full HTTP surface with in-memory
//! doubles.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors, TokenVerifier};
use crate::routes::auth::{
    google::google_sign_in, logout::logout, phone::request_code, phone::verify_code,
    refresh::refresh, signup::signup,
};
use crate::routes::user::{leave::leave, profile::get_profile, profile::update_profile};
use crate::routes::AppState;

use wm_core::repositories::{AuthRequestRepository, TokenRepository, UserRepository};
use wm_core::services::auth::GoogleTokenVerifier;
use wm_core::services::verification::SmsSender;
use wm_shared::types::ErrorResponse;

/// Create and configure the application with all dependencies
pub fn create_app<U, A, S, T, G>(
    app_state: web::Data<AppState<U, A, S, T, G>>,
    token_verifier: Arc<dyn TokenVerifier>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    A: AuthRequestRepository + 'static,
    S: SmsSender + 'static,
    T: TokenRepository + 'static,
    G: GoogleTokenVerifier + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(token_verifier))
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/phone", web::post().to(request_code::<U, A, S, T, G>))
                        .route("/phone", web::put().to(verify_code::<U, A, S, T, G>))
                        .route("/signup", web::post().to(signup::<U, A, S, T, G>))
                        .route("/google", web::post().to(google_sign_in::<U, A, S, T, G>))
                        .route("/refresh", web::post().to(refresh::<U, A, S, T, G>))
                        .route(
                            "/logout",
                            web::post().to(logout::<U, A, S, T, G>).wrap(JwtAuth::new()),
                        ),
                )
                .service(
                    web::scope("/user")
                        .route(
                            "",
                            web::delete().to(leave::<U, A, S, T, G>).wrap(JwtAuth::new()),
                        )
                        .route(
                            "/me",
                            web::get()
                                .to(get_profile::<U, A, S, T, G>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/me",
                            web::put()
                                .to(update_profile::<U, A, S, T, G>)
                                .wrap(JwtAuth::new()),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "wafflemarket-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("NOT_FOUND", "Resource not found"))
}
