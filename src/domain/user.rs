//! User domain model

use super::common::StringUuid;
use super::Ownable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Phone numbers are local mobile numbers: leading 9 or 7, nine digits total.
lazy_static::lazy_static! {
    pub static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^(9|7)\d{8}$").unwrap();
}

/// Validate the phone number format ('912345678' / '712345678')
pub(crate) fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_phone"))
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: StringUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// System admin flag; grants unrestricted access everywhere.
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            password_hash: String::new(),
            is_staff: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Ownable for User {
    fn record_id(&self) -> StringUuid {
        self.id
    }

    // Users are self-registered; nobody "creates" them on someone's behalf.
    fn creator_id(&self) -> Option<StringUuid> {
        None
    }
}

/// Input for registering a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 150))]
    pub first_name: String,
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Input for updating a user's profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

/// Input for changing the caller's own password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordInput {
    pub old_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    pub new_password_confirm: String,
}

/// A single-use password reset token. Consumed tokens stay in the
/// table with `used = true`; unconsumed tokens go stale after
/// [`PasswordResetToken::TTL_HOURS`].
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: StringUuid,
    pub user_id: StringUuid,
    pub token: String,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub const TTL_HOURS: i64 = 24;

    /// Still redeemable: never consumed and not past its TTL.
    pub fn is_usable(&self) -> bool {
        !self.used && Utc::now() - self.created_at < chrono::Duration::hours(Self::TTL_HOURS)
    }
}

/// Input for requesting a password reset link
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestPasswordResetInput {
    #[validate(email)]
    pub email: String,
}

/// Input for setting a new password with a reset token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordInput {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub password_confirm: String,
}

/// Input for logging in with either email or phone
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    /// Email address or phone number
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}
