pub mod auth_request;
pub mod token;
pub mod user;

pub use auth_request::{AuthRequestRepository, MockAuthRequestRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
