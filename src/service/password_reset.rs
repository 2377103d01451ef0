//! Forgot-password workflow: mail a reset link, redeem it once
//!
//! The reset token is a single-use compare-and-set key like the
//! invitation token. Redeeming it proves control of the mailbox, so
//! confirmation needs no old password.

use crate::domain::{RequestPasswordResetInput, ResetPasswordInput};
use crate::error::{AppError, Result};
use crate::notification::{EmailPayload, NotificationDispatcher};
use crate::repository::{PasswordResetRepository, UserRepository};
use crate::service::auth::hash_password;
use crate::service::invitation::generate_token;
use std::sync::Arc;
use validator::Validate;

pub struct PasswordResetService<U, PR>
where
    U: UserRepository,
    PR: PasswordResetRepository,
{
    user_repo: Arc<U>,
    reset_repo: Arc<PR>,
    notifier: Arc<dyn NotificationDispatcher>,
    app_base_url: String,
}

impl<U, PR> PasswordResetService<U, PR>
where
    U: UserRepository,
    PR: PasswordResetRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        reset_repo: Arc<PR>,
        notifier: Arc<dyn NotificationDispatcher>,
        app_base_url: String,
    ) -> Self {
        Self {
            user_repo,
            reset_repo,
            notifier,
            app_base_url,
        }
    }

    /// Issue a reset token and mail the reset link.
    pub async fn request_reset(&self, input: RequestPasswordResetInput) -> Result<()> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| {
                AppError::Validation("User with this email does not exist".to_string())
            })?;

        let token = generate_token();
        let reset = self.reset_repo.create(user.id, &token).await?;

        let reset_link = format!(
            "{}/password-reset-confirm?token={}",
            self.app_base_url.trim_end_matches('/'),
            reset.token
        );

        let payload = EmailPayload {
            subject: "Password Reset".to_string(),
            message: format!(
                "Click the link below to reset your password:\n\n{}",
                reset_link
            ),
            recipients: vec![user.email.clone()],
        };

        let _ = self.notifier.send_email(&payload).await.map_err(|e| {
            tracing::error!("Failed to send password reset email: {}", e);
            e
        });

        Ok(())
    }

    /// Redeem a reset token and store the new password hash.
    ///
    /// Exactly one confirm wins per token; a second attempt, raced or
    /// sequential, gets a bad-request error.
    pub async fn confirm_reset(&self, input: ResetPasswordInput) -> Result<()> {
        input.validate()?;

        if input.password != input.password_confirm {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }

        let reset = self
            .reset_repo
            .consume(&input.token)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid or expired token".to_string()))?;

        let password_hash = hash_password(&input.password)?;
        self.user_repo
            .update_password(reset.user_id, &password_hash)
            .await
    }
}
