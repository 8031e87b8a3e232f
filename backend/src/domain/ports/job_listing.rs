//! Driving port for job read paths.

use async_trait::async_trait;

use crate::domain::{Error, Job, JobId, JobSearchFilters, UserId};

/// Job listing use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobListing: Send + Sync {
    /// Published jobs matching `filters`, newest first.
    async fn search(&self, filters: JobSearchFilters) -> Result<Vec<Job>, Error>;

    /// Every job owned by `caller`, newest first.
    async fn list_for_recruiter(&self, caller: &UserId) -> Result<Vec<Job>, Error>;

    /// A single job for display.
    ///
    /// Drafts resolve only for their owner. Views by anyone other than the
    /// owner are counted.
    async fn get_by_id(&self, job_id: &JobId, viewer: Option<UserId>) -> Result<Job, Error>;
}
