//! Employee invitation domain types

use super::common::StringUuid;
use super::employee::EmployeeRole;
use super::user::validate_phone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A pending offer to become an employee, redeemable exactly once via
/// its token. Two states only: pending (`accepted = false`) and
/// accepted (`accepted = true`, terminal). Tokens never expire and
/// cannot be revoked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeInvitation {
    pub id: StringUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: EmployeeRole,
    pub business_id: StringUuid,
    pub created_by: StringUuid,
    #[serde(skip_serializing)]
    pub token: String,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeInvitation {
    /// A pending invitation can still be redeemed.
    pub fn is_pending(&self) -> bool {
        !self.accepted
    }
}

impl Default for EmployeeInvitation {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            role: EmployeeRole::default(),
            business_id: StringUuid::new_v4(),
            created_by: StringUuid::new_v4(),
            token: String::new(),
            accepted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a new invitation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvitationInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 150))]
    pub first_name: String,
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    /// Role the invitee will hold once the invitation is accepted
    pub role: EmployeeRole,
    /// Target business. Required; an employee cannot exist without one.
    pub business_id: Option<StringUuid>,
}

/// Input for redeeming an invitation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcceptInvitationInput {
    #[validate(length(min = 1))]
    pub token: String,
}

/// API response for a created invitation
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub id: StringUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: EmployeeRole,
    pub business_id: StringUuid,
    pub created_by: StringUuid,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<EmployeeInvitation> for InvitationResponse {
    fn from(inv: EmployeeInvitation) -> Self {
        Self {
            id: inv.id,
            email: inv.email,
            first_name: inv.first_name,
            last_name: inv.last_name,
            phone: inv.phone,
            role: inv.role,
            business_id: inv.business_id,
            created_by: inv.created_by,
            accepted: inv.accepted,
            created_at: inv.created_at,
        }
    }
}
