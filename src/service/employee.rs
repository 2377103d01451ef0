//! Employee business logic
//!
//! Employees are managed here but never created here: the only path
//! into the employees table is invitation acceptance.

use crate::domain::{Business, Employee, StringUuid, UpdateEmployeeInput};
use crate::error::{AppError, Result};
use crate::policy::{gate, Actor};
use crate::repository::{BusinessRepository, EmployeeRepository};
use std::sync::Arc;
use validator::Validate;

pub struct EmployeeService<E: EmployeeRepository, B: BusinessRepository> {
    employee_repo: Arc<E>,
    business_repo: Arc<B>,
}

impl<E: EmployeeRepository, B: BusinessRepository> EmployeeService<E, B> {
    pub fn new(employee_repo: Arc<E>, business_repo: Arc<B>) -> Self {
        Self {
            employee_repo,
            business_repo,
        }
    }

    /// Direct employee creation is not part of the API for anyone,
    /// owner and system admin included. The rejection is structural
    /// rather than an authorization denial.
    pub fn create_direct(&self, _actor: &Actor) -> Result<Employee> {
        Err(AppError::MethodNotSupported(
            "Employees are created by accepting an invitation".to_string(),
        ))
    }

    pub async fn get(&self, actor: &Actor, id: StringUuid) -> Result<Employee> {
        let employee = self.find_employee(id).await?;
        let business = self.find_business(employee.business_id).await?;

        if !gate::can_retrieve_employee(actor, &employee, &business) {
            return Err(AppError::Forbidden(
                "Not allowed to view this employee".to_string(),
            ));
        }

        Ok(employee)
    }

    /// List the employees of a business the actor can see. The page is
    /// filtered by the retrieval rule, so a Manager sees only Sales
    /// colleagues while the owner sees everyone.
    pub async fn list(
        &self,
        actor: &Actor,
        business_id: StringUuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Employee>> {
        let business = self.find_business(business_id).await?;

        let member = actor
            .employment
            .as_ref()
            .is_some_and(|emp| emp.business_id == business_id);
        if !(actor.is_staff || business.owner_id == actor.user_id || member) {
            return Err(AppError::Forbidden(
                "Not allowed to list employees of this business".to_string(),
            ));
        }

        let employees = self
            .employee_repo
            .list_by_business(business_id, offset, limit)
            .await?;

        Ok(employees
            .into_iter()
            .filter(|e| gate::can_retrieve_employee(actor, e, &business))
            .collect())
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: StringUuid,
        input: UpdateEmployeeInput,
    ) -> Result<Employee> {
        input.validate()?;

        let employee = self.find_employee(id).await?;
        let business = self.find_business(employee.business_id).await?;

        if !gate::can_update_employee(actor, &employee, &business, input.role) {
            return Err(AppError::Forbidden(
                "Not allowed to update this employee".to_string(),
            ));
        }

        self.employee_repo.update(id, &input).await
    }

    pub async fn delete(&self, actor: &Actor, id: StringUuid) -> Result<()> {
        let employee = self.find_employee(id).await?;
        let business = self.find_business(employee.business_id).await?;

        if !gate::can_delete_employee(actor, &employee, &business) {
            return Err(AppError::Forbidden(
                "Not allowed to delete this employee".to_string(),
            ));
        }

        self.employee_repo.delete(id).await
    }

    async fn find_employee(&self, id: StringUuid) -> Result<Employee> {
        self.employee_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    async fn find_business(&self, id: StringUuid) -> Result<Business> {
        self.business_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", id)))
    }
}
