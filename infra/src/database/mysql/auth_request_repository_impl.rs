//! MySQL implementation of the AuthRequestRepository trait.
//!
//! Verification codes live in the `auth_requests` table. Issuing a new
//! code deletes any previous row for the phone inside one transaction,
//! which keeps the one-active-code-per-phone invariant in the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::debug;
use uuid::Uuid;

use wm_core::domain::entities::auth_request::AuthRequest;
use wm_core::errors::DomainError;
use wm_core::repositories::AuthRequestRepository;

/// MySQL implementation of AuthRequestRepository
pub struct MySqlAuthRequestRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuthRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &sqlx::mysql::MySqlRow) -> Result<AuthRequest, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(AuthRequest {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid auth request UUID: {}", e),
            })?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get phone_number: {}", e),
                })?,
            auth_number: row
                .try_get("auth_number")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get auth_number: {}", e),
                })?,
            attempts: row.try_get("attempts").map_err(|e| DomainError::Internal {
                message: format!("Failed to get attempts: {}", e),
            })?,
            max_attempts: row
                .try_get("max_attempts")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get max_attempts: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            consumed: row.try_get("consumed").map_err(|e| DomainError::Internal {
                message: format!("Failed to get consumed: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl AuthRequestRepository for MySqlAuthRequestRepository {
    async fn replace_for_phone(&self, request: AuthRequest) -> Result<AuthRequest, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to start transaction: {}", e),
        })?;

        sqlx::query("DELETE FROM auth_requests WHERE phone_number = ?")
            .bind(&request.phone_number)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to clear previous auth request: {}", e),
            })?;

        sqlx::query(
            r#"
            INSERT INTO auth_requests (
                id, phone_number, auth_number, attempts, max_attempts,
                created_at, expires_at, consumed
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(&request.phone_number)
        .bind(&request.auth_number)
        .bind(request.attempts)
        .bind(request.max_attempts)
        .bind(request.created_at)
        .bind(request.expires_at)
        .bind(request.consumed)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to store auth request: {}", e),
        })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit auth request: {}", e),
        })?;

        Ok(request)
    }

    async fn find_active_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<AuthRequest>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone_number, auth_number, attempts, max_attempts,
                   created_at, expires_at, consumed
            FROM auth_requests
            WHERE phone_number = ? AND consumed = FALSE AND expires_at > NOW()
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to query auth request: {}", e),
        })?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn find_latest_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<AuthRequest>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone_number, auth_number, attempts, max_attempts,
                   created_at, expires_at, consumed
            FROM auth_requests
            WHERE phone_number = ? AND consumed = FALSE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to query auth request: {}", e),
        })?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn update(&self, request: AuthRequest) -> Result<AuthRequest, DomainError> {
        let result = sqlx::query(
            "UPDATE auth_requests SET attempts = ?, consumed = ? WHERE id = ?",
        )
        .bind(request.attempts)
        .bind(request.consumed)
        .bind(request.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to update auth request: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "AuthRequest".to_string(),
            });
        }

        Ok(request)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM auth_requests WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to purge expired auth requests: {}", e),
            })?;

        let purged = result.rows_affected();
        if purged > 0 {
            debug!(purged, "removed expired auth requests");
        }
        Ok(purged)
    }
}
