//! Request and response bodies for the user profile endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use wm_core::domain::entities::user::{AuthProvider, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub auth_provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            phone_number: user.phone_number,
            email: user.email,
            username: user.username,
            profile_image: user.profile_image,
            auth_provider: user.auth_provider,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 30))]
    pub username: Option<String>,

    #[validate(url)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveResponse {
    pub leaved: bool,
}
