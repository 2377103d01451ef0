//! Business domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Business entity. Each business is owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Business {
    pub id: StringUuid,
    pub name: String,
    pub address: String,
    pub category: String,
    pub owner_id: StringUuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Business {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            name: String::new(),
            address: String::new(),
            category: String::new(),
            owner_id: StringUuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a business
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBusinessInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
}

/// Input for updating a business
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBusinessInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
}
