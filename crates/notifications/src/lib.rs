//! Notification gateway for administrator-facing messages.
//!
//! - [`Notifier`] -- the capability handlers depend on.
//! - [`RefundNotice`] -- the message sent when a user asks for a refund.
//! - [`email::EmailNotifier`] -- SMTP delivery via `lettre`.
//! - [`LogNotifier`] -- used when SMTP is not configured; records the notice
//!   in the log only.

pub mod email;

use async_trait::async_trait;
use coursehub_core::types::{DbId, Timestamp};

pub use email::{EmailConfig, EmailError, EmailNotifier};

/// Refund request details forwarded to the administrator.
#[derive(Debug, Clone)]
pub struct RefundNotice {
    pub refund_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub course_id: DbId,
    pub course_name: String,
    pub message: String,
    pub purchased_at: Timestamp,
    pub requested_at: Timestamp,
}

impl RefundNotice {
    pub fn subject(&self) -> String {
        format!("[CourseHub] Refund request for {}", self.course_name)
    }

    pub fn body(&self) -> String {
        format!(
            "A refund has been requested.\n\n\
             Request: #{}\n\
             User: {} <{}>\n\
             Course: {} (#{})\n\
             Purchased: {}\n\
             Requested: {}\n\n\
             Message:\n{}\n",
            self.refund_id,
            self.user_name,
            self.user_email,
            self.course_name,
            self.course_id,
            self.purchased_at.format("%Y-%m-%d %H:%M UTC"),
            self.requested_at.format("%Y-%m-%d %H:%M UTC"),
            self.message,
        )
    }
}

/// Error type for notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Email(#[from] EmailError),
}

/// Sends administrator notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn refund_requested(&self, notice: &RefundNotice) -> Result<(), NotifyError>;
}

/// Fallback notifier that only logs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn refund_requested(&self, notice: &RefundNotice) -> Result<(), NotifyError> {
        tracing::warn!(
            refund_id = notice.refund_id,
            course_id = notice.course_id,
            user_email = %notice.user_email,
            "SMTP not configured; refund notice logged only"
        );
        Ok(())
    }
}
