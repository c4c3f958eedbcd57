//! Outbound mail seam
//!
//! Actual delivery belongs to an external collaborator; the default
//! implementation only logs, which keeps the password-reset flow testable
//! without an SMTP dependency.

use async_trait::async_trait;
use thiserror::Error;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Outbound mail collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand a password-reset token to the account's email address
    async fn send_password_reset(&self, to: &str, reset_token: &str) -> Result<(), MailError>;
}

/// Log-only mailer
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, to: &str, _reset_token: &str) -> Result<(), MailError> {
        // The token itself stays out of the logs
        tracing::info!(to = %to, "Password reset requested (mail delivery not configured)");
        Ok(())
    }
}
