//! Invitation repository
//!
//! Acceptance is the only place employee rows get inserted, and it runs
//! in a single transaction with a compare-and-set on the `accepted`
//! flag so a raced token redeems at most once.

use crate::domain::{CreateInvitationInput, Employee, EmployeeInvitation, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Create a new invitation
    async fn create(
        &self,
        created_by: StringUuid,
        business_id: StringUuid,
        input: &CreateInvitationInput,
        token: &str,
    ) -> Result<EmployeeInvitation>;

    /// Find invitation by ID
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<EmployeeInvitation>>;

    /// Find invitation by its acceptance token
    async fn find_by_token(&self, token: &str) -> Result<Option<EmployeeInvitation>>;

    /// Find a still-pending invitation for this email in this business
    async fn find_pending_by_email(
        &self,
        email: &str,
        business_id: StringUuid,
    ) -> Result<Option<EmployeeInvitation>>;

    /// List invitations for a business
    async fn list_by_business(
        &self,
        business_id: StringUuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<EmployeeInvitation>>;

    /// Count invitations for a business
    async fn count_by_business(&self, business_id: StringUuid) -> Result<i64>;

    /// Redeem the invitation behind `token`: insert the employee row
    /// and flip `accepted` in one transaction. Returns `None` when the
    /// token is unknown or was already redeemed, and the transaction
    /// rolls back.
    async fn accept(&self, token: &str, password_hash: &str) -> Result<Option<Employee>>;
}

pub struct InvitationRepositoryImpl {
    pool: MySqlPool,
}

impl InvitationRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const INVITATION_COLUMNS: &str = "id, email, first_name, last_name, phone, role, business_id, created_by, token, accepted, created_at, updated_at";

#[async_trait]
impl InvitationRepository for InvitationRepositoryImpl {
    async fn create(
        &self,
        created_by: StringUuid,
        business_id: StringUuid,
        input: &CreateInvitationInput,
        token: &str,
    ) -> Result<EmployeeInvitation> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO employee_invitations (id, email, first_name, last_name, phone, role, business_id, created_by, token, accepted, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, false, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(input.role)
        .bind(business_id)
        .bind(created_by)
        .bind(token)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create invitation")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<EmployeeInvitation>> {
        let invitation = sqlx::query_as::<_, EmployeeInvitation>(&format!(
            "SELECT {} FROM employee_invitations WHERE id = ?",
            INVITATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<EmployeeInvitation>> {
        let invitation = sqlx::query_as::<_, EmployeeInvitation>(&format!(
            "SELECT {} FROM employee_invitations WHERE token = ?",
            INVITATION_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn find_pending_by_email(
        &self,
        email: &str,
        business_id: StringUuid,
    ) -> Result<Option<EmployeeInvitation>> {
        let invitation = sqlx::query_as::<_, EmployeeInvitation>(&format!(
            "SELECT {} FROM employee_invitations WHERE email = ? AND business_id = ? AND accepted = false ORDER BY created_at DESC LIMIT 1",
            INVITATION_COLUMNS
        ))
        .bind(email)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn list_by_business(
        &self,
        business_id: StringUuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<EmployeeInvitation>> {
        let invitations = sqlx::query_as::<_, EmployeeInvitation>(&format!(
            "SELECT {} FROM employee_invitations WHERE business_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
            INVITATION_COLUMNS
        ))
        .bind(business_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(invitations)
    }

    async fn count_by_business(&self, business_id: StringUuid) -> Result<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM employee_invitations WHERE business_id = ?")
                .bind(business_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    async fn accept(&self, token: &str, password_hash: &str) -> Result<Option<Employee>> {
        let mut tx = self.pool.begin().await?;

        let invitation = sqlx::query_as::<_, EmployeeInvitation>(&format!(
            "SELECT {} FROM employee_invitations WHERE token = ? FOR UPDATE",
            INVITATION_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let invitation = match invitation {
            Some(inv) if inv.is_pending() => inv,
            _ => return Ok(None),
        };

        let employee_id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO employees (id, email, first_name, last_name, phone, password_hash, role, business_id, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(employee_id)
        .bind(&invitation.email)
        .bind(&invitation.first_name)
        .bind(&invitation.last_name)
        .bind(&invitation.phone)
        .bind(password_hash)
        .bind(invitation.role)
        .bind(invitation.business_id)
        .bind(invitation.created_by)
        .execute(&mut *tx)
        .await?;

        // CAS guard: without the row lock above this still redeems at
        // most once, because only one writer can flip the flag.
        let result = sqlx::query(
            r#"
            UPDATE employee_invitations
            SET accepted = true, updated_at = NOW()
            WHERE id = ? AND accepted = false
            "#,
        )
        .bind(invitation.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, email, first_name, last_name, phone, password_hash, role, business_id, created_by, created_at, updated_at
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(employee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_mock_find_by_token() {
        let mut mock = MockInvitationRepository::new();

        mock.expect_find_by_token()
            .with(eq("token-abc"))
            .returning(|_| {
                Ok(Some(EmployeeInvitation {
                    token: "token-abc".to_string(),
                    ..Default::default()
                }))
            });

        let result = mock.find_by_token("token-abc").await.unwrap();
        assert!(result.unwrap().is_pending());
    }

    #[tokio::test]
    async fn test_mock_accept_consumed_token() {
        let mut mock = MockInvitationRepository::new();

        mock.expect_accept().returning(|_, _| Ok(None));

        let result = mock.accept("stale-token", "hash").await.unwrap();
        assert!(result.is_none());
    }
}
