//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use wm_core::domain::entities::user::{AuthProvider, User};
use wm_core::errors::DomainError;
use wm_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const USER_COLUMNS: &str = "id, phone_number, email, username, profile_image, \
     auth_provider, created_at, updated_at, last_login_at, is_active";

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let provider: String =
            row.try_get("auth_provider")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get auth_provider: {}", e),
                })?;
        let auth_provider = match provider.as_str() {
            "phone" => AuthProvider::Phone,
            "google" => AuthProvider::Google,
            other => {
                return Err(DomainError::Internal {
                    message: format!("Unknown auth provider: {}", other),
                })
            }
        };

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get phone_number: {}", e),
                })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            username: row.try_get("username").map_err(|e| DomainError::Internal {
                message: format!("Failed to get username: {}", e),
            })?,
            profile_image: row
                .try_get("profile_image")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get profile_image: {}", e),
                })?,
            auth_provider,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
        })
    }

    fn provider_str(provider: AuthProvider) -> &'static str {
        match provider {
            AuthProvider::Phone => "phone",
            AuthProvider::Google => "google",
        }
    }

    async fn find_one(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ?",
            USER_COLUMNS, column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query user by {}: {}", column, e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        self.find_one("phone_number", phone_number).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, phone_number, email, username, profile_image,
                auth_provider, created_at, updated_at, last_login_at, is_active
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone_number)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.profile_image)
            .bind(Self::provider_str(user.auth_provider))
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: "User already exists".to_string(),
                    }
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET phone_number = ?, email = ?, username = ?, profile_image = ?,
                auth_provider = ?, updated_at = ?, last_login_at = ?, is_active = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.phone_number)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.profile_image)
            .bind(Self::provider_str(user.auth_provider))
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.is_active)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete user: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = ?) AS present",
        )
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to check phone existence: {}", e),
        })?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;
        Ok(present == 1)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let row =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?) AS present")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to check username existence: {}", e),
                })?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;
        Ok(present == 1)
    }
}
