//! Employee domain model and the ranked role enum

use super::common::StringUuid;
use super::user::validate_phone;
use super::Ownable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Employee role, a total order used for assignment ceilings and
/// retrieval visibility: Sales < Manager < Admin.
///
/// A closed enum rather than free-form strings so the hierarchy check
/// is exhaustive and compiler-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeRole {
    #[default]
    Sales,
    Manager,
    Admin,
}

impl EmployeeRole {
    /// Ordinal rank within the hierarchy (Sales=1, Manager=2, Admin=3)
    pub fn rank(self) -> u8 {
        match self {
            EmployeeRole::Sales => 1,
            EmployeeRole::Manager => 2,
            EmployeeRole::Admin => 3,
        }
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sales" => Ok(Self::Sales),
            "Manager" => Ok(Self::Manager),
            "Admin" => Ok(Self::Admin),
            _ => Err(format!("Unknown employee role: {}", s)),
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sales => write!(f, "Sales"),
            Self::Manager => write!(f, "Manager"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for EmployeeRole {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for EmployeeRole {
    fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for EmployeeRole {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        let s = self.to_string();
        <String as sqlx::Encode<sqlx::MySql>>::encode(s, buf)
    }
}

/// Employee entity: an identity scoped to exactly one business with a
/// ranked role. Employees only come into existence through invitation
/// acceptance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: StringUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: EmployeeRole,
    pub business_id: StringUuid,
    /// Who invited this employee. A weak back-reference: the creator
    /// may be deleted without cascading to the employee.
    pub created_by: Option<StringUuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Employee {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            password_hash: String::new(),
            role: EmployeeRole::default(),
            business_id: StringUuid::new_v4(),
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Ownable for Employee {
    fn record_id(&self) -> StringUuid {
        self.id
    }

    fn creator_id(&self) -> Option<StringUuid> {
        self.created_by
    }
}

/// Input for updating an employee record
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployeeInput {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    /// Role changes go through the hierarchy check in the gate.
    pub role: Option<EmployeeRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ranks_are_total_order() {
        assert!(EmployeeRole::Sales.rank() < EmployeeRole::Manager.rank());
        assert!(EmployeeRole::Manager.rank() < EmployeeRole::Admin.rank());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Sales".parse::<EmployeeRole>().unwrap(), EmployeeRole::Sales);
        assert_eq!(
            "Manager".parse::<EmployeeRole>().unwrap(),
            EmployeeRole::Manager
        );
        assert_eq!("Admin".parse::<EmployeeRole>().unwrap(), EmployeeRole::Admin);
        assert!("admin".parse::<EmployeeRole>().is_err());
        assert!("Owner".parse::<EmployeeRole>().is_err());
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in [EmployeeRole::Sales, EmployeeRole::Manager, EmployeeRole::Admin] {
            assert_eq!(role.to_string().parse::<EmployeeRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&EmployeeRole::Manager).unwrap();
        assert_eq!(json, "\"Manager\"");
        let parsed: EmployeeRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EmployeeRole::Manager);
    }

    #[test]
    fn test_employee_creator_is_weak() {
        let creator = StringUuid::new_v4();
        let employee = Employee {
            created_by: Some(creator),
            ..Default::default()
        };
        assert_eq!(employee.creator_id(), Some(creator));

        let orphaned = Employee {
            created_by: None,
            ..Default::default()
        };
        assert!(orphaned.creator_id().is_none());
    }
}
