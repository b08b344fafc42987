//! Business services containing domain logic and use cases.

pub mod auth;
pub mod profile;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, GoogleProfile, GoogleTokenVerifier};
pub use profile::ProfileService;
pub use token::TokenService;
pub use verification::{SmsSender, VerificationService};
