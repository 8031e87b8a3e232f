//! Port abstraction for job persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Job, JobId, JobSearchFilters, JobTransition, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Store unreachable, pool exhausted or query timed out.
        Connection { message: String } => "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "job repository query failed: {message}",
    }
}

/// Driven port for job storage.
///
/// Mutations are single conditional statements: a `None`/`false` result
/// means the guard did not hold at write time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Store a new job.
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError>;

    /// Fetch a job by identifier.
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError>;

    /// Fetch every job in `ids` that still exists, in no particular order.
    async fn find_many(&self, ids: &[JobId]) -> Result<Vec<Job>, JobRepositoryError>;

    /// Apply `transition` only if the job is still in its source status.
    async fn apply_transition(
        &self,
        id: &JobId,
        transition: JobTransition,
        at: DateTime<Utc>,
    ) -> Result<Option<Job>, JobRepositoryError>;

    /// Delete the job only while it is a draft.
    async fn delete_draft(&self, id: &JobId) -> Result<bool, JobRepositoryError>;

    /// Atomically add one view to a published or closed job.
    async fn increment_views(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError>;

    /// Published jobs matching `filters`, newest publication first.
    async fn search(&self, filters: &JobSearchFilters) -> Result<Vec<Job>, JobRepositoryError>;

    /// Every job owned by `recruiter`, newest first.
    async fn list_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, JobRepositoryError>;
}
