//! User entity representing a registered account in the Wafflemarket system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the account was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Phone number + SMS verification
    Phone,
    /// Google sign-in
    Google,
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Phone number in E.164 format, unique when present
    pub phone_number: Option<String>,

    /// Email address (always present for Google accounts)
    pub email: Option<String>,

    /// Display name, unique when present
    pub username: Option<String>,

    /// Profile image URL
    pub profile_image: Option<String>,

    /// How the account was created
    pub auth_provider: AuthProvider,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Whether the account is active
    pub is_active: bool,
}

impl User {
    /// Creates a new phone-verified user
    pub fn new_phone(phone_number: String, username: Option<String>, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number: Some(phone_number),
            email,
            username,
            profile_image: None,
            auth_provider: AuthProvider::Phone,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            is_active: true,
        }
    }

    /// Creates a new Google-authenticated user
    pub fn new_google(email: String, username: String, profile_image: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number: None,
            email: Some(email),
            username: Some(username),
            profile_image,
            auth_provider: AuthProvider::Google,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            is_active: true,
        }
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Sets the username
    pub fn set_username(&mut self, username: String) {
        self.username = Some(username);
        self.updated_at = Utc::now();
    }

    /// Sets the profile image URL
    pub fn set_profile_image(&mut self, url: String) {
        self.profile_image = Some(url);
        self.updated_at = Utc::now();
    }

    /// Deactivates the account without deleting it
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Whether this user has never logged in before
    pub fn is_first_login(&self) -> bool {
        self.last_login_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_phone_user() {
        let user = User::new_phone("+821012345678".to_string(), None, None);

        assert_eq!(user.phone_number.as_deref(), Some("+821012345678"));
        assert_eq!(user.auth_provider, AuthProvider::Phone);
        assert!(user.username.is_none());
        assert!(user.is_active);
        assert!(user.is_first_login());
    }

    #[test]
    fn test_new_google_user() {
        let user = User::new_google(
            "waffle@gmail.com".to_string(),
            "waffle".to_string(),
            Some("https://example.com/pic.jpg".to_string()),
        );

        assert_eq!(user.email.as_deref(), Some("waffle@gmail.com"));
        assert_eq!(user.username.as_deref(), Some("waffle"));
        assert_eq!(user.auth_provider, AuthProvider::Google);
        assert!(user.phone_number.is_none());
    }

    #[test]
    fn test_update_last_login() {
        let mut user = User::new_phone("+821012345678".to_string(), None, None);

        assert!(user.is_first_login());
        user.update_last_login();
        assert!(!user.is_first_login());
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_set_username() {
        let mut user = User::new_phone("+821012345678".to_string(), None, None);
        user.set_username("seller123".to_string());
        assert_eq!(user.username.as_deref(), Some("seller123"));
    }

    #[test]
    fn test_deactivate() {
        let mut user = User::new_phone("+821012345678".to_string(), None, None);
        assert!(user.is_active);
        user.deactivate();
        assert!(!user.is_active);
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Phone).unwrap();
        assert_eq!(json, "\"phone\"");
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");
    }
}
