//! Port abstraction for bookmark persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{JobId, SavedJob, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by saved job repository adapters.
    pub enum SavedJobRepositoryError {
        /// The job is already bookmarked by the user.
        Duplicate => "job already saved by this user",
        /// Store unreachable, pool exhausted or query timed out.
        Connection { message: String } => "saved job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "saved job repository query failed: {message}",
    }
}

/// Driven port for bookmark storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedJobRepository: Send + Sync {
    /// Store a bookmark; a second one for the same pair fails with
    /// [`SavedJobRepositoryError::Duplicate`].
    async fn insert(&self, saved: &SavedJob) -> Result<(), SavedJobRepositoryError>;

    /// Remove a bookmark, reporting whether one existed.
    async fn delete(&self, user_id: &UserId, job_id: &JobId)
    -> Result<bool, SavedJobRepositoryError>;

    /// Every bookmark of `user_id`, newest first, including orphans.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<SavedJob>, SavedJobRepositoryError>;

    /// Whether `user_id` bookmarked `job_id`.
    async fn exists(&self, user_id: &UserId, job_id: &JobId)
    -> Result<bool, SavedJobRepositoryError>;
}
