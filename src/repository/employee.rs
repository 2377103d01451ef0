//! Employee repository
//!
//! There is deliberately no `create` here: employee rows are inserted
//! only inside the invitation acceptance transaction.

use crate::domain::{Employee, StringUuid, UpdateEmployeeInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Employee>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Employee>>;
    async fn list_by_business(
        &self,
        business_id: StringUuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Employee>>;
    async fn count_by_business(&self, business_id: StringUuid) -> Result<i64>;
    async fn update(&self, id: StringUuid, input: &UpdateEmployeeInput) -> Result<Employee>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct EmployeeRepositoryImpl {
    pool: MySqlPool,
}

impl EmployeeRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, email, first_name, last_name, phone, password_hash, role, business_id, created_by, created_at, updated_at";

#[async_trait]
impl EmployeeRepository for EmployeeRepositoryImpl {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE email = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE phone = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn list_by_business(
        &self,
        business_id: StringUuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE business_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(business_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn count_by_business(&self, business_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE business_id = ?")
            .bind(business_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: StringUuid, input: &UpdateEmployeeInput) -> Result<Employee> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

        let email = input.email.as_ref().unwrap_or(&existing.email);
        let first_name = input.first_name.as_ref().unwrap_or(&existing.first_name);
        let last_name = input.last_name.as_ref().unwrap_or(&existing.last_name);
        let phone = input.phone.as_ref().unwrap_or(&existing.phone);
        let role = input.role.unwrap_or(existing.role);

        sqlx::query(
            r#"
            UPDATE employees
            SET email = ?, first_name = ?, last_name = ?, phone = ?, role = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(role)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update employee")))
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        Ok(())
    }
}
