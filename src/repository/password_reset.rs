//! Password reset token repository
//!
//! Consumption runs a compare-and-set on the `used` flag inside a
//! transaction, the same shape as invitation acceptance, so a raced
//! token resets a password at most once.

use crate::domain::{PasswordResetToken, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Store a fresh token for this user
    async fn create(&self, user_id: StringUuid, token: &str) -> Result<PasswordResetToken>;

    /// Consume the token behind `token`: flip `used` in one
    /// transaction. Returns `None` when the token is unknown, already
    /// consumed or past its TTL.
    async fn consume(&self, token: &str) -> Result<Option<PasswordResetToken>>;
}

pub struct PasswordResetRepositoryImpl {
    pool: MySqlPool,
}

impl PasswordResetRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const RESET_TOKEN_COLUMNS: &str = "id, user_id, token, used, created_at";

#[async_trait]
impl PasswordResetRepository for PasswordResetRepositoryImpl {
    async fn create(&self, user_id: StringUuid, token: &str) -> Result<PasswordResetToken> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (id, user_id, token, used, created_at)
            VALUES (?, ?, ?, false, NOW())
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        let reset = sqlx::query_as::<_, PasswordResetToken>(&format!(
            "SELECT {} FROM password_reset_tokens WHERE id = ?",
            RESET_TOKEN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        reset.ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create reset token")))
    }

    async fn consume(&self, token: &str) -> Result<Option<PasswordResetToken>> {
        let mut tx = self.pool.begin().await?;

        let reset = sqlx::query_as::<_, PasswordResetToken>(&format!(
            "SELECT {} FROM password_reset_tokens WHERE token = ? FOR UPDATE",
            RESET_TOKEN_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let reset = match reset {
            Some(r) if r.is_usable() => r,
            _ => return Ok(None),
        };

        let result = sqlx::query(
            r#"
            UPDATE password_reset_tokens
            SET used = true
            WHERE id = ? AND used = false
            "#,
        )
        .bind(reset.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some(reset))
    }
}
