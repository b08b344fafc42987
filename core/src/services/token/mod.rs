//! JWT access token and refresh token management

mod service;

pub use service::TokenService;
