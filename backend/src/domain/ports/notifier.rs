//! Port for best-effort email notifications.

use async_trait::async_trait;

use crate::domain::{ApplicationStatus, EmailAddress};

use super::define_port_error;

/// Events worth telling a user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A seeker applied to a recruiter's job.
    ApplicationReceived {
        recruiter_email: EmailAddress,
        job_title: String,
        company_name: String,
        applicant_name: String,
    },
    /// A recruiter decided on a seeker's application.
    ApplicationDecided {
        seeker_email: EmailAddress,
        seeker_name: String,
        job_title: String,
        company_name: String,
        status: ApplicationStatus,
    },
}

impl Notification {
    /// Address the notification goes to.
    pub fn recipient(&self) -> &EmailAddress {
        match self {
            Self::ApplicationReceived {
                recruiter_email, ..
            } => recruiter_email,
            Self::ApplicationDecided { seeker_email, .. } => seeker_email,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApplicationReceived { .. } => "application_received",
            Self::ApplicationDecided { .. } => "application_decided",
        }
    }
}

define_port_error! {
    /// Failures raised by notification adapters.
    pub enum NotifierError {
        /// The message could not be built or delivered.
        Delivery { message: String } => "notification delivery failed: {message}",
    }
}

/// Driven port delivering notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `notification`.
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError>;
}

/// Notifier used when no mail relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError> {
        tracing::debug!(kind = notification.kind(), "mail relay not configured; skipping");
        Ok(())
    }
}
