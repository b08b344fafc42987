//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the Bearer token from the Authorization header, verifies it
//! through the token service registered in app data, and injects an
//! [`AuthContext`] into the request extensions. Requests that fail
//! verification are answered with 401 directly.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;
use wm_shared::types::ErrorResponse;

use wm_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    repositories::TokenRepository,
    services::token::TokenService,
};

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// Username if the user has chosen one
    pub username: Option<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            username: claims.username,
            is_active: claims.is_active,
            jti: claims.jti,
        })
    }
}

/// Trait object wrapper so the middleware can verify tokens without
/// knowing the concrete repository type
pub trait TokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError>;
}

impl<R: TokenRepository> TokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

/// JWT authentication middleware factory
#[derive(Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(unauthorized(
                        req,
                        "Missing or invalid Authorization header",
                    ));
                }
            };

            let Some(verifier) = req.app_data::<web::Data<Arc<dyn TokenVerifier>>>() else {
                return Ok(unauthorized(req, "Token verification not configured"));
            };

            let claims = match verifier.verify_access_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    log::debug!("token verification failed: {}", e);
                    return Ok(unauthorized(req, "Token verification failed"));
                }
            };

            let context = match AuthContext::from_claims(claims) {
                Ok(context) => context,
                Err(_) => return Ok(unauthorized(req, "Invalid token claims")),
            };

            if !context.is_active {
                return Ok(unauthorized(req, "Account deactivated"));
            }

            req.extensions_mut().insert(context);

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

/// Builds a 401 response, short-circuiting the rest of the chain
fn unauthorized<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>> {
    let (req, _payload) = req.into_parts();
    let response = HttpResponse::Unauthorized()
        .json(ErrorResponse::new("UNAUTHORIZED", message))
        .map_into_right_body();
    ServiceResponse::new(req, response)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
