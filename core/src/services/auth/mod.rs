//! Authentication use cases: phone login, signup, Google sign-in,
//! session refresh, logout and account deletion.

mod google;
mod service;

pub use google::{GoogleProfile, GoogleTokenVerifier, MockGoogleVerifier};
pub use service::AuthService;
