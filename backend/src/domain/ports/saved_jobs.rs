//! Driving port for seeker bookmarks.

use async_trait::async_trait;

use crate::domain::{Error, JobId, SavedJob, SavedJobEntry, SavedJobStatus, UserId};

/// Bookmark use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedJobs: Send + Sync {
    /// Bookmark a published or closed job.
    async fn save(&self, user: &UserId, job_id: &JobId) -> Result<SavedJob, Error>;

    /// Remove a bookmark.
    async fn unsave(&self, user: &UserId, job_id: &JobId) -> Result<(), Error>;

    /// Bookmarks whose job still exists, newest first.
    async fn list(&self, user: &UserId) -> Result<Vec<SavedJobEntry>, Error>;

    /// Whether `job_id` is bookmarked.
    async fn is_saved(&self, user: &UserId, job_id: &JobId) -> Result<SavedJobStatus, Error>;

    /// Identifiers of every bookmarked job.
    async fn saved_job_ids(&self, user: &UserId) -> Result<Vec<JobId>, Error>;
}
