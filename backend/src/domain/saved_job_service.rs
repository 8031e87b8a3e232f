//! Seeker bookmarks.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::access::require_role;
use crate::domain::ports::{JobRepository, SavedJobRepository, SavedJobs, UserRepository};
use crate::domain::service_support::{
    job_not_found, map_job_repository_error, map_saved_job_repository_error,
    map_user_repository_error,
};
use crate::domain::{
    Error, JobId, JobSnapshot, SavedJob, SavedJobEntry, SavedJobStatus, UserId, UserRole,
};

/// Service implementing [`SavedJobs`].
#[derive(Clone)]
pub struct SavedJobService<J, S, U> {
    jobs: Arc<J>,
    saved: Arc<S>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<J, S, U> SavedJobService<J, S, U> {
    /// Create a bookmark service.
    pub fn new(jobs: Arc<J>, saved: Arc<S>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs,
            saved,
            users,
            clock,
        }
    }
}

impl<J, S, U> SavedJobService<J, S, U>
where
    S: SavedJobRepository,
{
    async fn bookmarks(&self, user: &UserId) -> Result<Vec<SavedJob>, Error> {
        self.saved
            .list_for_user(user)
            .await
            .map_err(map_saved_job_repository_error)
    }
}

#[async_trait]
impl<J, S, U> SavedJobs for SavedJobService<J, S, U>
where
    J: JobRepository,
    S: SavedJobRepository,
    U: UserRepository,
{
    async fn save(&self, user: &UserId, job_id: &JobId) -> Result<SavedJob, Error> {
        let profile = self
            .users
            .find_by_id(user)
            .await
            .map_err(map_user_repository_error)?;
        require_role(profile, UserRole::JobSeeker)?;

        let job = self
            .jobs
            .find_by_id(job_id)
            .await
            .map_err(map_job_repository_error)?
            .filter(|job| job.is_public())
            .ok_or_else(|| job_not_found(job_id))?;

        let saved = SavedJob::of(user.clone(), &job, self.clock.utc());
        self.saved
            .insert(&saved)
            .await
            .map_err(map_saved_job_repository_error)?;
        info!(job_id = %job_id, "job saved");
        Ok(saved)
    }

    async fn unsave(&self, user: &UserId, job_id: &JobId) -> Result<(), Error> {
        let removed = self
            .saved
            .delete(user, job_id)
            .await
            .map_err(map_saved_job_repository_error)?;
        if !removed {
            return Err(Error::not_found("job is not in your saved list"));
        }
        info!(job_id = %job_id, "job unsaved");
        Ok(())
    }

    async fn list(&self, user: &UserId) -> Result<Vec<SavedJobEntry>, Error> {
        let saved = self.bookmarks(user).await?;
        let ids: Vec<JobId> = saved
            .iter()
            .map(|entry| entry.job_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let jobs: HashMap<JobId, JobSnapshot> = self
            .jobs
            .find_many(&ids)
            .await
            .map_err(map_job_repository_error)?
            .iter()
            .map(|job| (job.id, JobSnapshot::from(job)))
            .collect();

        let total = saved.len();
        let entries: Vec<SavedJobEntry> = saved
            .into_iter()
            .filter_map(|saved| {
                let job = jobs.get(&saved.job_id)?.clone();
                Some(SavedJobEntry { saved, job })
            })
            .collect();
        if entries.len() < total {
            debug!(dropped = total - entries.len(), "skipped bookmarks of deleted jobs");
        }
        Ok(entries)
    }

    async fn is_saved(&self, user: &UserId, job_id: &JobId) -> Result<SavedJobStatus, Error> {
        let is_saved = self
            .saved
            .exists(user, job_id)
            .await
            .map_err(map_saved_job_repository_error)?;
        Ok(SavedJobStatus { is_saved })
    }

    async fn saved_job_ids(&self, user: &UserId) -> Result<Vec<JobId>, Error> {
        Ok(self
            .bookmarks(user)
            .await?
            .into_iter()
            .map(|saved| saved.job_id)
            .collect())
    }
}
