//! Business repository

use crate::domain::{Business, CreateBusinessInput, StringUuid, UpdateBusinessInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn create(&self, owner_id: StringUuid, input: &CreateBusinessInput) -> Result<Business>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Business>>;
    async fn find_by_owner(&self, owner_id: StringUuid) -> Result<Option<Business>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Business>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: StringUuid, input: &UpdateBusinessInput) -> Result<Business>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct BusinessRepositoryImpl {
    pool: MySqlPool,
}

impl BusinessRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for BusinessRepositoryImpl {
    async fn create(&self, owner_id: StringUuid, input: &CreateBusinessInput) -> Result<Business> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO businesses (id, name, address, category, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.category)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create business")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Business>> {
        let business = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, name, address, category, owner_id, created_at, updated_at
            FROM businesses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    async fn find_by_owner(&self, owner_id: StringUuid) -> Result<Option<Business>> {
        let business = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, name, address, category, owner_id, created_at, updated_at
            FROM businesses
            WHERE owner_id = ?
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Business>> {
        let businesses = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, name, address, category, owner_id, created_at, updated_at
            FROM businesses
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(businesses)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM businesses")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: StringUuid, input: &UpdateBusinessInput) -> Result<Business> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", id)))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let address = input.address.as_ref().unwrap_or(&existing.address);
        let category = input.category.as_ref().unwrap_or(&existing.category);

        sqlx::query(
            r#"
            UPDATE businesses
            SET name = ?, address = ?, category = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(category)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update business")))
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM businesses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Business {} not found", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_find_by_owner() {
        let mut mock = MockBusinessRepository::new();
        let owner_id = StringUuid::new_v4();

        mock.expect_find_by_owner()
            .with(eq(owner_id))
            .returning(move |owner_id| {
                Ok(Some(Business {
                    owner_id,
                    name: "Corner Shop".to_string(),
                    ..Default::default()
                }))
            });

        let result = mock.find_by_owner(owner_id).await.unwrap();
        assert_eq!(result.unwrap().owner_id, owner_id);
    }
}
