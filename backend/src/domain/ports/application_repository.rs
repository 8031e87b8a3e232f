//! Port abstraction for application persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    ApplicantStats, Application, ApplicationId, ApplicationStatus, JobId, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// The seeker already applied to the job.
        Duplicate => "an application for this job and seeker already exists",
        /// Store unreachable, pool exhausted or query timed out.
        Connection { message: String } => "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
    }
}

/// Driven port for application storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Store a new application; a second one for the same job and seeker
    /// fails with [`ApplicationRepositoryError::Duplicate`].
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// The seeker's application to `job_id`, if any.
    async fn find_for_seeker(
        &self,
        job_id: &JobId,
        seeker_id: &UserId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// The application `id` if it belongs to `job_id`.
    async fn find_in_job(
        &self,
        job_id: &JobId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Every application by `seeker_id`, newest first.
    async fn list_for_seeker(
        &self,
        seeker_id: &UserId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Applications to `job_id`, newest first, optionally filtered by status.
    async fn list_for_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Record `status` only while the application is pending and its job is
    /// published.
    async fn decide(
        &self,
        job_id: &JobId,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Application counts per status for `job_id`.
    async fn count_by_status(
        &self,
        job_id: &JobId,
    ) -> Result<ApplicantStats, ApplicationRepositoryError>;
}
