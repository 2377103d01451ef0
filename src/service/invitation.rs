//! Invitation workflow: issue, deliver, redeem
//!
//! Redeeming a token is the only way an employee record comes into
//! existence, so acceptance runs inside one repository transaction and
//! the token is a single-use compare-and-set key.

use crate::domain::{
    AcceptInvitationInput, CreateInvitationInput, Employee, InvitationResponse, StringUuid,
};
use crate::error::{AppError, Result};
use crate::notification::{EmailPayload, NotificationDispatcher};
use crate::policy::{gate, Actor};
use crate::repository::{BusinessRepository, InvitationRepository};
use crate::service::auth::hash_password;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use validator::Validate;

const TEMP_PASSWORD_LEN: usize = 12;

pub struct InvitationService<IR, BR>
where
    IR: InvitationRepository,
    BR: BusinessRepository,
{
    invitation_repo: Arc<IR>,
    business_repo: Arc<BR>,
    notifier: Arc<dyn NotificationDispatcher>,
    app_base_url: String,
}

impl<IR, BR> InvitationService<IR, BR>
where
    IR: InvitationRepository,
    BR: BusinessRepository,
{
    pub fn new(
        invitation_repo: Arc<IR>,
        business_repo: Arc<BR>,
        notifier: Arc<dyn NotificationDispatcher>,
        app_base_url: String,
    ) -> Self {
        Self {
            invitation_repo,
            business_repo,
            notifier,
            app_base_url,
        }
    }

    /// Issue an invitation and send the acceptance link.
    ///
    /// Gate check runs after field validation, so a request with no
    /// business fails with a validation error rather than a denial.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateInvitationInput,
    ) -> Result<InvitationResponse> {
        input.validate()?;

        let business_id = input
            .business_id
            .ok_or_else(|| AppError::Validation("business_id is required".to_string()))?;

        let business = self
            .business_repo
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", business_id)))?;

        if !gate::can_create_employee(actor, &business, input.role) {
            return Err(AppError::Forbidden(format!(
                "Not allowed to invite a {} employee",
                input.role
            )));
        }

        if let Some(existing) = self
            .invitation_repo
            .find_pending_by_email(&input.email, business_id)
            .await?
        {
            if existing.is_pending() {
                return Err(AppError::Conflict(format!(
                    "An invitation for {} already exists",
                    input.email
                )));
            }
        }

        let token = generate_token();

        let invitation = self
            .invitation_repo
            .create(actor.user_id, business_id, &input, &token)
            .await?;

        let accept_link = format!(
            "{}/accept-invitation?token={}",
            self.app_base_url.trim_end_matches('/'),
            token
        );

        let payload = EmailPayload {
            subject: format!("You have been invited to join {}", business.name),
            message: format!(
                "Hello {},\n\nYou have been invited to join {} as {}. \
                 Follow this link to accept the invitation:\n\n{}",
                invitation.first_name, business.name, invitation.role, accept_link
            ),
            recipients: vec![invitation.email.clone()],
        };

        let _ = self.notifier.send_email(&payload).await.map_err(|e| {
            tracing::error!("Failed to send invitation email: {}", e);
            e
        });

        Ok(invitation.into())
    }

    /// Redeem an invitation token.
    ///
    /// Exactly one accept wins per token; a second attempt, raced or
    /// sequential, gets `InvalidInvitation`.
    pub async fn accept(&self, input: AcceptInvitationInput) -> Result<Employee> {
        input.validate()?;

        let temp_password = generate_temp_password();
        let password_hash = hash_password(&temp_password)?;

        let employee = self
            .invitation_repo
            .accept(&input.token, &password_hash)
            .await?
            .ok_or_else(|| {
                AppError::InvalidInvitation("Unknown or already used invitation token".to_string())
            })?;

        let payload = EmailPayload {
            subject: "Welcome aboard".to_string(),
            message: format!(
                "Hello {},\n\nYour employee account is ready. Sign in with \
                 your email address and this temporary password, then change \
                 it right away:\n\n{}",
                employee.first_name, temp_password
            ),
            recipients: vec![employee.email.clone()],
        };

        let _ = self.notifier.send_email(&payload).await.map_err(|e| {
            tracing::error!("Failed to send welcome email: {}", e);
            e
        });

        Ok(employee)
    }

    /// Get one invitation, visible to the business owner or staff.
    pub async fn get(&self, actor: &Actor, id: StringUuid) -> Result<InvitationResponse> {
        let invitation = self
            .invitation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invitation {} not found", id)))?;

        self.check_business_access(actor, invitation.business_id)
            .await?;
        Ok(invitation.into())
    }

    /// List a business's invitations, owner or staff only.
    pub async fn list(
        &self,
        actor: &Actor,
        business_id: StringUuid,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<InvitationResponse>, i64)> {
        self.check_business_access(actor, business_id).await?;

        let invitations = self
            .invitation_repo
            .list_by_business(business_id, offset, limit)
            .await?;
        let total = self.invitation_repo.count_by_business(business_id).await?;

        Ok((
            invitations.into_iter().map(Into::into).collect(),
            total,
        ))
    }

    async fn check_business_access(&self, actor: &Actor, business_id: StringUuid) -> Result<()> {
        let business = self
            .business_repo
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", business_id)))?;

        if !gate::can_access_business(actor, &business) {
            return Err(AppError::Forbidden(
                "Not allowed to view invitations of this business".to_string(),
            ));
        }
        Ok(())
    }
}

/// 32 random bytes, URL-safe base64. Stored as-is and looked up by
/// equality, so the column carries a unique index. Password reset
/// tokens use the same shape.
pub(crate) fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
