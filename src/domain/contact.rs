//! Customer and supplier records
//!
//! These carry no authorization logic of their own; access goes through
//! the generic owner-or-admin rule via [`Ownable`].

use super::common::StringUuid;
use super::Ownable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Customer record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: StringUuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_by: Option<StringUuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ownable for Customer {
    fn record_id(&self) -> StringUuid {
        self.id
    }

    fn creator_id(&self) -> Option<StringUuid> {
        self.created_by
    }
}

/// Supplier record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    pub id: StringUuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_by: Option<StringUuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ownable for Supplier {
    fn record_id(&self) -> StringUuid {
        self.id
    }

    fn creator_id(&self) -> Option<StringUuid> {
        self.created_by
    }
}
