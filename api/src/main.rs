use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use wm_api::app::create_app;
use wm_api::middleware::TokenVerifier;
use wm_api::routes::AppState;
use wm_core::services::auth::AuthService;
use wm_core::services::profile::ProfileService;
use wm_core::services::token::TokenService;
use wm_core::services::verification::VerificationService;
use wm_infra::database::connection::create_pool;
use wm_infra::database::mysql::{
    MySqlAuthRequestRepository, MySqlTokenRepository, MySqlUserRepository,
};
use wm_infra::oauth::GoogleTokenInfoVerifier;
use wm_infra::sms::ConsoleSmsSender;
use wm_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Wafflemarket API server");

    let config = AppConfig::from_env();
    if config.auth.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET not set; using the built-in development secret");
    }

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let auth_request_repo = Arc::new(MySqlAuthRequestRepository::new(pool.clone()));
    let token_repo = Arc::new(MySqlTokenRepository::new(pool));

    let sms = Arc::new(ConsoleSmsSender::new());
    let google = Arc::new(GoogleTokenInfoVerifier::new(config.auth.google.clone()));

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&token_repo),
        config.auth.jwt.clone(),
    ));
    let verification_service = VerificationService::new(
        Arc::clone(&auth_request_repo),
        Arc::clone(&sms),
        config.verification.clone(),
    );
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        verification_service,
        Arc::clone(&token_service),
        google,
    ));
    let profile_service = Arc::new(ProfileService::new(Arc::clone(&user_repo)));

    let app_state = web::Data::new(AppState {
        auth_service,
        profile_service,
    });
    let token_verifier: Arc<dyn TokenVerifier> = token_service;

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    let workers = config.server.workers;
    let mut server =
        HttpServer::new(move || create_app(app_state.clone(), Arc::clone(&token_verifier)));
    // workers = 0 means "one per core", actix's default
    if workers > 0 {
        server = server.workers(workers);
    }
    server.bind(bind_address)?.run().await
}
