//! Authentication: credential login and actor resolution

use crate::domain::{LoginInput, StringUuid};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::policy::Actor;
use crate::repository::{EmployeeRepository, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Hash a password with Argon2id and a fresh salt
pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Successful login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub struct AuthService<U: UserRepository, E: EmployeeRepository> {
    user_repo: Arc<U>,
    employee_repo: Arc<E>,
    jwt_manager: JwtManager,
    access_token_ttl_secs: i64,
}

impl<U: UserRepository, E: EmployeeRepository> AuthService<U, E> {
    pub fn new(
        user_repo: Arc<U>,
        employee_repo: Arc<E>,
        jwt_manager: JwtManager,
        access_token_ttl_secs: i64,
    ) -> Self {
        Self {
            user_repo,
            employee_repo,
            jwt_manager,
            access_token_ttl_secs,
        }
    }

    /// Log in with an email address or phone number plus password.
    ///
    /// Users and employees share one credential namespace: the user
    /// table is consulted first, then employees.
    pub async fn login(&self, input: LoginInput) -> Result<TokenResponse> {
        input.validate()?;

        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        if let Some(user) = self.find_user(&input.identifier).await? {
            if !user.is_active {
                return Err(invalid());
            }
            if !verify_password(&input.password, &user.password_hash) {
                return Err(invalid());
            }
            let token = self
                .jwt_manager
                .create_access_token(user.id, &user.email, &user.phone)?;
            return Ok(self.token_response(token));
        }

        if let Some(employee) = self.find_employee(&input.identifier).await? {
            if !verify_password(&input.password, &employee.password_hash) {
                return Err(invalid());
            }
            let token = self.jwt_manager.create_access_token(
                employee.id,
                &employee.email,
                &employee.phone,
            )?;
            return Ok(self.token_response(token));
        }

        Err(invalid())
    }

    /// Resolve an authenticated subject into an authorization actor.
    ///
    /// Looks the subject up as a user first (staff flag, no
    /// employment), then as an employee (business + role snapshot).
    pub async fn resolve_actor(&self, subject: StringUuid) -> Result<Actor> {
        if let Some(user) = self.user_repo.find_by_id(subject).await? {
            if !user.is_active {
                return Err(AppError::Unauthorized("Account is disabled".to_string()));
            }
            return Ok(Actor::user(user.id, user.is_staff));
        }

        if let Some(employee) = self.employee_repo.find_by_id(subject).await? {
            return Ok(Actor::employee(
                employee.id,
                employee.business_id,
                employee.role,
            ));
        }

        Err(AppError::Unauthorized("Unknown subject".to_string()))
    }

    fn token_response(&self, access_token: String) -> TokenResponse {
        TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl_secs,
        }
    }

    async fn find_user(&self, identifier: &str) -> Result<Option<crate::domain::User>> {
        if identifier.contains('@') {
            self.user_repo.find_by_email(identifier).await
        } else {
            self.user_repo.find_by_phone(identifier).await
        }
    }

    async fn find_employee(&self, identifier: &str) -> Result<Option<crate::domain::Employee>> {
        if identifier.contains('@') {
            self.employee_repo.find_by_email(identifier).await
        } else {
            self.employee_repo.find_by_phone(identifier).await
        }
    }
}
