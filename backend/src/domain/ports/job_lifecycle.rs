//! Driving port for recruiter-driven job mutations.

use async_trait::async_trait;

use crate::domain::{
    Application, ApplicationId, ApplicationStatus, Error, Job, JobFields, JobId, UserId,
};

/// Job lifecycle use cases.
///
/// Every mutation is restricted to the owning recruiter and guarded by the
/// `draft -> published -> closed` state machine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobLifecycle: Send + Sync {
    /// Create a draft owned by `recruiter`.
    async fn create_draft(&self, recruiter: &UserId, fields: JobFields) -> Result<Job, Error>;

    /// Move a draft to `published`.
    async fn publish(&self, job_id: &JobId, caller: &UserId) -> Result<Job, Error>;

    /// Move a published job to `closed`.
    async fn close(&self, job_id: &JobId, caller: &UserId) -> Result<Job, Error>;

    /// Delete a job while it is still a draft.
    async fn delete_draft(&self, job_id: &JobId, caller: &UserId) -> Result<(), Error>;

    /// Count one view of a published or closed job.
    async fn record_view(&self, job_id: &JobId) -> Result<Job, Error>;

    /// Record the recruiter's decision on a pending application.
    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
        caller: &UserId,
    ) -> Result<Application, Error>;
}
