//! Business entity logic

use crate::domain::{Business, CreateBusinessInput, StringUuid, UpdateBusinessInput};
use crate::error::{AppError, Result};
use crate::policy::{gate, Actor};
use crate::repository::BusinessRepository;
use std::sync::Arc;
use validator::Validate;

pub struct BusinessService<B: BusinessRepository> {
    repo: Arc<B>,
}

impl<B: BusinessRepository> BusinessService<B> {
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    /// Register a business owned by the calling user. Employees of an
    /// existing business cannot double as owners.
    pub async fn create(&self, actor: &Actor, input: CreateBusinessInput) -> Result<Business> {
        input.validate()?;

        if !gate::can_create_business(actor) {
            return Err(AppError::Forbidden(
                "Employees cannot register a business".to_string(),
            ));
        }

        if self.repo.find_by_owner(actor.user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "User already owns a business".to_string(),
            ));
        }

        self.repo.create(actor.user_id, &input).await
    }

    pub async fn get(&self, actor: &Actor, id: StringUuid) -> Result<Business> {
        let business = self.find(id).await?;
        if !gate::can_access_business(actor, &business) {
            return Err(AppError::Forbidden(
                "Not allowed to view this business".to_string(),
            ));
        }
        Ok(business)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Business>, i64)> {
        if !gate::can_list_businesses(actor) {
            return Err(AppError::Forbidden(
                "Only system admins may list businesses".to_string(),
            ));
        }
        let businesses = self.repo.list(offset, limit).await?;
        let total = self.repo.count().await?;
        Ok((businesses, total))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: StringUuid,
        input: UpdateBusinessInput,
    ) -> Result<Business> {
        input.validate()?;

        let business = self.find(id).await?;
        if !gate::can_access_business(actor, &business) {
            return Err(AppError::Forbidden(
                "Not allowed to update this business".to_string(),
            ));
        }

        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, actor: &Actor, id: StringUuid) -> Result<()> {
        let business = self.find(id).await?;
        if !gate::can_access_business(actor, &business) {
            return Err(AppError::Forbidden(
                "Not allowed to delete this business".to_string(),
            ));
        }

        self.repo.delete(id).await
    }

    async fn find(&self, id: StringUuid) -> Result<Business> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeRole;
    use crate::repository::business::MockBusinessRepository;
    use mockall::predicate::*;
    use pretty_assertions::assert_eq;

    fn create_input() -> CreateBusinessInput {
        CreateBusinessInput {
            name: "Corner Shop".to_string(),
            address: "12 Market St".to_string(),
            category: "Retail".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_by_plain_user() {
        let owner_id = StringUuid::new_v4();
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_by_owner().returning(|_| Ok(None));
        repo.expect_create().returning(|owner_id, input| {
            Ok(Business {
                owner_id,
                name: input.name.clone(),
                ..Default::default()
            })
        });

        let service = BusinessService::new(Arc::new(repo));
        let business = service
            .create(&Actor::user(owner_id, false), create_input())
            .await
            .unwrap();
        assert_eq!(business.owner_id, owner_id);
        assert_eq!(business.name, "Corner Shop");
    }

    #[tokio::test]
    async fn test_create_by_employee_forbidden() {
        let service = BusinessService::new(Arc::new(MockBusinessRepository::new()));
        let actor = Actor::employee(
            StringUuid::new_v4(),
            StringUuid::new_v4(),
            EmployeeRole::Admin,
        );

        let err = service.create(&actor, create_input()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_second_business_conflicts() {
        let owner_id = StringUuid::new_v4();
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_by_owner()
            .with(eq(owner_id))
            .returning(|owner_id| {
                Ok(Some(Business {
                    owner_id,
                    ..Default::default()
                }))
            });

        let service = BusinessService::new(Arc::new(repo));
        let err = service
            .create(&Actor::user(owner_id, false), create_input())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_by_owner_and_staff_only() {
        let owner_id = StringUuid::new_v4();
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            Ok(Some(Business {
                id,
                owner_id,
                ..Default::default()
            }))
        });

        let service = BusinessService::new(Arc::new(repo));
        let id = StringUuid::new_v4();

        assert!(service.get(&Actor::user(owner_id, false), id).await.is_ok());
        assert!(service
            .get(&Actor::user(StringUuid::new_v4(), true), id)
            .await
            .is_ok());

        let err = service
            .get(&Actor::user(StringUuid::new_v4(), false), id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_list_is_staff_only() {
        let mut repo = MockBusinessRepository::new();
        repo.expect_list().returning(|_, _| Ok(vec![]));
        repo.expect_count().returning(|| Ok(0));

        let service = BusinessService::new(Arc::new(repo));

        let err = service
            .list(&Actor::user(StringUuid::new_v4(), false), 0, 20)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert!(service
            .list(&Actor::user(StringUuid::new_v4(), true), 0, 20)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_business_not_found() {
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = BusinessService::new(Arc::new(repo));
        let err = service
            .update(
                &Actor::user(StringUuid::new_v4(), true),
                StringUuid::new_v4(),
                UpdateBusinessInput::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
