//! Profile service implementation

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;

/// Read and update operations on the authenticated user's profile
pub struct ProfileService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> ProfileService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Loads the profile of an existing user
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Applies partial profile changes. A new username must not collide
    /// with another account's.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        username: Option<String>,
        profile_image: Option<String>,
    ) -> DomainResult<User> {
        let mut user = self.get_profile(user_id).await?;

        if let Some(new_username) = username {
            if user.username.as_deref() != Some(new_username.as_str()) {
                if self.users.exists_by_username(&new_username).await? {
                    return Err(AuthError::UsernameTaken {
                        username: new_username,
                    }
                    .into());
                }
                user.set_username(new_username);
            }
        }

        if let Some(image) = profile_image {
            user.set_profile_image(image);
        }

        let user = self.users.update(user).await?;
        info!(%user_id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repositories::MockUserRepository;

    async fn seeded() -> (
        ProfileService<MockUserRepository>,
        Arc<MockUserRepository>,
        User,
    ) {
        let users = Arc::new(MockUserRepository::new());
        let user = User::new_phone(
            "01012345678".to_string(),
            Some("waffle".to_string()),
            None,
        );
        users.insert(user.clone()).await;
        (ProfileService::new(Arc::clone(&users)), users, user)
    }

    #[tokio::test]
    async fn test_get_profile() {
        let (svc, _users, user) = seeded().await;
        let loaded = svc.get_profile(user.id).await.unwrap();
        assert_eq!(loaded.username.as_deref(), Some("waffle"));
    }

    #[tokio::test]
    async fn test_get_profile_unknown_user() {
        let (svc, _users, _) = seeded().await;
        let result = svc.get_profile(Uuid::new_v4()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_username() {
        let (svc, _users, user) = seeded().await;
        let updated = svc
            .update_profile(user.id, Some("pancake".to_string()), None)
            .await
            .unwrap();
        assert_eq!(updated.username.as_deref(), Some("pancake"));
    }

    #[tokio::test]
    async fn test_update_username_collision() {
        let (svc, users, user) = seeded().await;
        users
            .insert(User::new_phone(
                "01087654321".to_string(),
                Some("pancake".to_string()),
                None,
            ))
            .await;

        let result = svc
            .update_profile(user.id, Some("pancake".to_string()), None)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_keeping_own_username_is_allowed() {
        let (svc, _users, user) = seeded().await;
        let updated = svc
            .update_profile(
                user.id,
                Some("waffle".to_string()),
                Some("https://example.com/p.jpg".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(updated.username.as_deref(), Some("waffle"));
        assert_eq!(
            updated.profile_image.as_deref(),
            Some("https://example.com/p.jpg")
        );
    }
}
