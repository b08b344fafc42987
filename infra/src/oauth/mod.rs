//! External identity provider integrations

mod google;

pub use google::GoogleTokenInfoVerifier;
