//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            access_token_expiry: 3600,       // 1 hour
            refresh_token_expiry: 2_592_000, // 30 days
            issuer: String::from("wafflemarket"),
            audience: String::from("wafflemarket-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// Google sign-in configuration
///
/// Only the client id is needed server-side: incoming id tokens are verified
/// against Google's tokeninfo endpoint and the `aud` claim must match.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// OAuth client ID issued by the Google console
    pub client_id: String,

    /// Tokeninfo endpoint used for server-side id token verification
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
}

fn default_tokeninfo_url() -> String {
    String::from("https://oauth2.googleapis.com/tokeninfo")
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            tokeninfo_url: default_tokeninfo_url(),
        }
    }
}

/// Combined authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT settings
    pub jwt: JwtConfig,

    /// Google sign-in settings
    pub google: GoogleConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut jwt = JwtConfig::default();
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            jwt.secret = secret;
        }
        if let Ok(expiry) = std::env::var("JWT_ACCESS_TOKEN_EXPIRY") {
            if let Ok(seconds) = expiry.parse() {
                jwt.access_token_expiry = seconds;
            }
        }
        if let Ok(expiry) = std::env::var("JWT_REFRESH_TOKEN_EXPIRY") {
            if let Ok(seconds) = expiry.parse() {
                jwt.refresh_token_expiry = seconds;
            }
        }

        let google = GoogleConfig {
            client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            tokeninfo_url: std::env::var("GOOGLE_TOKENINFO_URL")
                .unwrap_or_else(|_| default_tokeninfo_url()),
        };

        Self { jwt, google }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_detection() {
        let config = JwtConfig::default();
        assert!(config.is_using_default_secret());

        let config = JwtConfig::new("real-secret");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_default_tokeninfo_url() {
        let config = GoogleConfig::default();
        assert!(config.tokeninfo_url.contains("oauth2.googleapis.com"));
    }
}
