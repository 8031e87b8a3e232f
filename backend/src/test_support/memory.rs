//! In-memory repositories with the same guards as the PostgreSQL adapters.
//!
//! One [`InMemoryStore`] implements all four repository ports so services
//! built over it see each other's writes. Conditional updates check their
//! guard and apply under a single lock.

use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, JobRepository, JobRepositoryError,
    SavedJobRepository, SavedJobRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    ApplicantStats, Application, ApplicationId, ApplicationStatus, Job, JobId, JobSearchFilters,
    JobStatus, JobTransition, SavedJob, UserId, UserProfile,
};

#[derive(Debug, Default)]
struct Tables {
    jobs: Vec<Job>,
    applications: Vec<Application>,
    saved_jobs: Vec<SavedJob>,
    users: Vec<UserProfile>,
}

/// Shared in-memory backing for every repository port.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored jobs.
    pub fn job_count(&self) -> usize {
        self.tables().jobs.len()
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        let mut tables = self.tables();
        if tables.jobs.iter().any(|existing| existing.id == job.id) {
            return Err(JobRepositoryError::query("job already exists"));
        }
        tables.jobs.push(job.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        Ok(self.tables().jobs.iter().find(|job| job.id == *id).cloned())
    }

    async fn find_many(&self, ids: &[JobId]) -> Result<Vec<Job>, JobRepositoryError> {
        Ok(self
            .tables()
            .jobs
            .iter()
            .filter(|job| ids.contains(&job.id))
            .cloned()
            .collect())
    }

    async fn apply_transition(
        &self,
        id: &JobId,
        transition: JobTransition,
        at: DateTime<Utc>,
    ) -> Result<Option<Job>, JobRepositoryError> {
        let mut tables = self.tables();
        let Some(job) = tables
            .jobs
            .iter_mut()
            .find(|job| job.id == *id && job.status == transition.from_status())
        else {
            return Ok(None);
        };
        job.status = transition.to_status();
        match transition {
            JobTransition::Publish => job.published_at = Some(at),
            JobTransition::Close => job.closed_at = Some(at),
        }
        job.updated_at = at;
        Ok(Some(job.clone()))
    }

    async fn delete_draft(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut tables = self.tables();
        let before = tables.jobs.len();
        tables
            .jobs
            .retain(|job| !(job.id == *id && job.status == JobStatus::Draft));
        Ok(tables.jobs.len() < before)
    }

    async fn increment_views(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let mut tables = self.tables();
        let Some(job) = tables
            .jobs
            .iter_mut()
            .find(|job| job.id == *id && job.status != JobStatus::Draft)
        else {
            return Ok(None);
        };
        job.views += 1;
        Ok(Some(job.clone()))
    }

    async fn search(&self, filters: &JobSearchFilters) -> Result<Vec<Job>, JobRepositoryError> {
        let mut found: Vec<Job> = self
            .tables()
            .jobs
            .iter()
            .filter(|job| filters.matches(job))
            .cloned()
            .collect();
        found.sort_by_key(|job| Reverse((job.published_at, job.created_at)));
        Ok(found)
    }

    async fn list_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, JobRepositoryError> {
        let mut owned: Vec<Job> = self
            .tables()
            .jobs
            .iter()
            .filter(|job| job.recruiter_id == *recruiter)
            .cloned()
            .collect();
        owned.sort_by_key(|job| Reverse(job.created_at));
        Ok(owned)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut tables = self.tables();
        if tables.applications.iter().any(|existing| {
            existing.job_id == application.job_id && existing.seeker_id == application.seeker_id
        }) {
            return Err(ApplicationRepositoryError::duplicate());
        }
        tables.applications.push(application.clone());
        Ok(())
    }

    async fn find_for_seeker(
        &self,
        job_id: &JobId,
        seeker_id: &UserId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self
            .tables()
            .applications
            .iter()
            .find(|app| app.job_id == *job_id && app.seeker_id == *seeker_id)
            .cloned())
    }

    async fn find_in_job(
        &self,
        job_id: &JobId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self
            .tables()
            .applications
            .iter()
            .find(|app| app.id == *id && app.job_id == *job_id)
            .cloned())
    }

    async fn list_for_seeker(
        &self,
        seeker_id: &UserId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut found: Vec<Application> = self
            .tables()
            .applications
            .iter()
            .filter(|app| app.seeker_id == *seeker_id)
            .cloned()
            .collect();
        found.sort_by_key(|app| Reverse(app.applied_at));
        Ok(found)
    }

    async fn list_for_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut found: Vec<Application> = self
            .tables()
            .applications
            .iter()
            .filter(|app| app.job_id == *job_id && status.is_none_or(|wanted| app.status == wanted))
            .cloned()
            .collect();
        found.sort_by_key(|app| Reverse(app.applied_at));
        Ok(found)
    }

    async fn decide(
        &self,
        job_id: &JobId,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut tables = self.tables();
        let job_published = tables
            .jobs
            .iter()
            .any(|job| job.id == *job_id && job.status == JobStatus::Published);
        if !job_published {
            return Ok(None);
        }
        let Some(application) = tables.applications.iter_mut().find(|app| {
            app.id == *id && app.job_id == *job_id && app.status == ApplicationStatus::Pending
        }) else {
            return Ok(None);
        };
        application.status = status;
        application.decided_at = Some(at);
        Ok(Some(application.clone()))
    }

    async fn count_by_status(
        &self,
        job_id: &JobId,
    ) -> Result<ApplicantStats, ApplicationRepositoryError> {
        let mut stats = ApplicantStats::default();
        for app in self
            .tables()
            .applications
            .iter()
            .filter(|app| app.job_id == *job_id)
        {
            stats.record(app.status, 1);
        }
        Ok(stats)
    }
}

#[async_trait]
impl SavedJobRepository for InMemoryStore {
    async fn insert(&self, saved: &SavedJob) -> Result<(), SavedJobRepositoryError> {
        let mut tables = self.tables();
        if tables
            .saved_jobs
            .iter()
            .any(|existing| existing.user_id == saved.user_id && existing.job_id == saved.job_id)
        {
            return Err(SavedJobRepositoryError::duplicate());
        }
        tables.saved_jobs.push(saved.clone());
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<bool, SavedJobRepositoryError> {
        let mut tables = self.tables();
        let before = tables.saved_jobs.len();
        tables
            .saved_jobs
            .retain(|saved| !(saved.user_id == *user_id && saved.job_id == *job_id));
        Ok(tables.saved_jobs.len() < before)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedJob>, SavedJobRepositoryError> {
        let mut found: Vec<SavedJob> = self
            .tables()
            .saved_jobs
            .iter()
            .filter(|saved| saved.user_id == *user_id)
            .cloned()
            .collect();
        found.sort_by_key(|saved| Reverse(saved.saved_at));
        Ok(found)
    }

    async fn exists(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<bool, SavedJobRepositoryError> {
        Ok(self
            .tables()
            .saved_jobs
            .iter()
            .any(|saved| saved.user_id == *user_id && saved.job_id == *job_id))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserRepositoryError> {
        Ok(self.tables().users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, UserRepositoryError> {
        Ok(self
            .tables()
            .users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), UserRepositoryError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|user| user.id == profile.id) {
            return Err(UserRepositoryError::already_exists());
        }
        if tables.users.iter().any(|user| user.email == profile.email) {
            return Err(UserRepositoryError::email_taken());
        }
        tables.users.push(profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), UserRepositoryError> {
        let mut tables = self.tables();
        if tables
            .users
            .iter()
            .any(|user| user.id != profile.id && user.email == profile.email)
        {
            return Err(UserRepositoryError::email_taken());
        }
        let stored = tables
            .users
            .iter_mut()
            .find(|user| user.id == profile.id)
            .ok_or_else(UserRepositoryError::missing)?;
        *stored = profile.clone();
        Ok(())
    }
}
