//! Infrastructure layer for the Wafflemarket backend.
//!
//! Concrete implementations of the core repository and gateway traits:
//! MySQL persistence via SQLx, a console SMS sender for development, and
//! Google ID token verification over HTTPS.

pub mod database;
pub mod oauth;
pub mod sms;

pub use database::connection::create_pool;
pub use database::mysql::{
    MySqlAuthRequestRepository, MySqlTokenRepository, MySqlUserRepository,
};
pub use oauth::GoogleTokenInfoVerifier;
pub use sms::ConsoleSmsSender;
