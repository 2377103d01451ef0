//! User business logic

use crate::domain::{ChangePasswordInput, CreateUserInput, StringUuid, UpdateUserInput, User};
use crate::error::{AppError, Result};
use crate::policy::{gate, Actor};
use crate::repository::UserRepository;
use crate::service::auth::{hash_password, verify_password};
use std::sync::Arc;
use validator::Validate;

pub struct UserService<U: UserRepository> {
    repo: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repo: Arc<U>) -> Self {
        Self { repo }
    }

    /// Open registration; no authentication required.
    pub async fn register(&self, input: CreateUserInput) -> Result<User> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                input.email
            )));
        }
        if self.repo.find_by_phone(&input.phone).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with phone '{}' already exists",
                input.phone
            )));
        }

        let password_hash = hash_password(&input.password)?;
        self.repo.create(&input, &password_hash).await
    }

    pub async fn get(&self, actor: &Actor, id: StringUuid) -> Result<User> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if !gate::owner_or_admin(actor, &user) {
            return Err(AppError::Forbidden(
                "Not allowed to view this user".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn list(&self, actor: &Actor, offset: i64, limit: i64) -> Result<(Vec<User>, i64)> {
        if !actor.is_staff {
            return Err(AppError::Forbidden(
                "Only system admins may list users".to_string(),
            ));
        }
        let users = self.repo.list(offset, limit).await?;
        let total = self.repo.count().await?;
        Ok((users, total))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: StringUuid,
        input: UpdateUserInput,
    ) -> Result<User> {
        input.validate()?;

        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if !gate::owner_or_admin(actor, &user) {
            return Err(AppError::Forbidden(
                "Not allowed to update this user".to_string(),
            ));
        }

        self.repo.update(id, &input).await
    }

    /// Change the caller's own password after proving the old one.
    pub async fn change_password(&self, actor: &Actor, input: ChangePasswordInput) -> Result<()> {
        input.validate()?;

        if input.new_password != input.new_password_confirm {
            return Err(AppError::Validation(
                "New password fields do not match".to_string(),
            ));
        }

        let user = self
            .repo
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(&input.old_password, &user.password_hash) {
            return Err(AppError::Validation(
                "Old password is incorrect".to_string(),
            ));
        }

        let password_hash = hash_password(&input.new_password)?;
        self.repo.update_password(user.id, &password_hash).await
    }

    pub async fn delete(&self, actor: &Actor, id: StringUuid) -> Result<()> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if !gate::owner_or_admin(actor, &user) {
            return Err(AppError::Forbidden(
                "Not allowed to delete this user".to_string(),
            ));
        }

        self.repo.delete(id).await
    }
}
