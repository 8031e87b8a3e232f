//! Job lifecycle and listing services.
//!
//! `JobService` implements both the [`JobLifecycle`] and [`JobListing`]
//! driving ports. Guards are checked against a fresh read to produce precise
//! errors, then enforced again by the repository's conditional update so a
//! lost race surfaces as an invalid transition instead of a silent overwrite.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::access::require_role;
use crate::domain::ports::{
    ApplicationRepository, JobLifecycle, JobListing, JobRepository, Notification, Notifier,
    UserRepository,
};
use crate::domain::service_support::{
    ensure_owner, invalid_field, job_not_found, map_application_repository_error,
    map_job_repository_error, map_user_repository_error, notify_best_effort,
};
use crate::domain::{
    Application, ApplicationId, ApplicationStatus, Error, Job, JobFields, JobId,
    JobSearchFilters, JobStatus, JobTransition, UserId, UserRole,
};

/// Service implementing the job driving ports.
#[derive(Clone)]
pub struct JobService<J, A, U> {
    jobs: Arc<J>,
    applications: Arc<A>,
    users: Arc<U>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl<J, A, U> JobService<J, A, U> {
    /// Create a job service over the given repositories.
    pub fn new(
        jobs: Arc<J>,
        applications: Arc<A>,
        users: Arc<U>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            jobs,
            applications,
            users,
            notifier,
            clock,
        }
    }
}

impl<J, A, U> JobService<J, A, U>
where
    J: JobRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    async fn load_job(&self, job_id: &JobId) -> Result<Job, Error> {
        self.jobs
            .find_by_id(job_id)
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| job_not_found(job_id))
    }

    /// Load a job owned by `caller`, who must currently hold the recruiter
    /// role.
    async fn load_owned_job(&self, job_id: &JobId, caller: &UserId) -> Result<Job, Error> {
        let job = self.load_job(job_id).await?;
        ensure_owner(&job, caller)?;
        let profile = self
            .users
            .find_by_id(caller)
            .await
            .map_err(map_user_repository_error)?;
        require_role(profile, UserRole::Recruiter)?;
        Ok(job)
    }

    async fn transition(
        &self,
        job_id: &JobId,
        caller: &UserId,
        transition: JobTransition,
    ) -> Result<Job, Error> {
        let job = self.load_owned_job(job_id, caller).await?;
        if !job.permits(transition) {
            return Err(Error::invalid_transition(format!(
                "cannot {} a job that is {}",
                transition.verb(),
                job.status
            ))
            .with_details(json!({
                "currentStatus": job.status,
                "requiredStatus": transition.from_status(),
            })));
        }

        let updated = self
            .jobs
            .apply_transition(job_id, transition, self.clock.utc())
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| {
                Error::invalid_transition(format!(
                    "job changed before it could become {}",
                    transition.to_status()
                ))
            })?;
        info!(job_id = %job_id, status = %updated.status, "job transitioned");
        Ok(updated)
    }

    async fn notify_decision(&self, job: &Job, application: &Application) {
        let seeker = match self.users.find_by_id(&application.seeker_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "could not load seeker for decision email");
                return;
            }
        };
        notify_best_effort(
            self.notifier.as_ref(),
            Notification::ApplicationDecided {
                seeker_name: seeker.display_name().to_owned(),
                seeker_email: seeker.email,
                job_title: job.title.clone(),
                company_name: job.company_name.clone(),
                status: application.status,
            },
        )
        .await;
    }
}

#[async_trait]
impl<J, A, U> JobLifecycle for JobService<J, A, U>
where
    J: JobRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    async fn create_draft(&self, recruiter: &UserId, fields: JobFields) -> Result<Job, Error> {
        let profile = self
            .users
            .find_by_id(recruiter)
            .await
            .map_err(map_user_repository_error)?;
        let profile = require_role(profile, UserRole::Recruiter)?;

        let mut fields = fields;
        let company_missing = fields
            .company_name
            .as_deref()
            .is_none_or(|name| name.trim().is_empty());
        if company_missing {
            fields.company_name.clone_from(&profile.company_name);
        }

        let job = Job::draft(
            JobId::random(),
            recruiter.clone(),
            profile.email,
            fields,
            self.clock.utc(),
        )
        .map_err(|err| invalid_field(err.field(), err.code(), err.to_string()))?;

        self.jobs
            .insert(&job)
            .await
            .map_err(map_job_repository_error)?;
        info!(job_id = %job.id, recruiter = %recruiter, "job draft created");
        Ok(job)
    }

    async fn publish(&self, job_id: &JobId, caller: &UserId) -> Result<Job, Error> {
        self.transition(job_id, caller, JobTransition::Publish).await
    }

    async fn close(&self, job_id: &JobId, caller: &UserId) -> Result<Job, Error> {
        self.transition(job_id, caller, JobTransition::Close).await
    }

    async fn delete_draft(&self, job_id: &JobId, caller: &UserId) -> Result<(), Error> {
        let job = self.load_owned_job(job_id, caller).await?;
        if job.status != JobStatus::Draft {
            return Err(Error::invalid_transition(format!(
                "only drafts can be deleted; this job is {}",
                job.status
            ))
            .with_details(json!({ "currentStatus": job.status })));
        }
        let deleted = self
            .jobs
            .delete_draft(job_id)
            .await
            .map_err(map_job_repository_error)?;
        if !deleted {
            return Err(Error::invalid_transition(
                "job changed before it could be deleted",
            ));
        }
        info!(job_id = %job_id, "job draft deleted");
        Ok(())
    }

    async fn record_view(&self, job_id: &JobId) -> Result<Job, Error> {
        self.jobs
            .increment_views(job_id)
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| job_not_found(job_id))
    }

    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
        caller: &UserId,
    ) -> Result<Application, Error> {
        let job = self.load_owned_job(job_id, caller).await?;
        if !status.is_terminal() {
            return Err(Error::invalid_transition(
                "an application can only be Accepted or Rejected",
            ));
        }
        if job.status != JobStatus::Published {
            return Err(Error::invalid_transition(format!(
                "applicant decisions are frozen while the job is {}",
                job.status
            ))
            .with_details(json!({ "jobStatus": job.status })));
        }

        let current = self
            .applications
            .find_in_job(job_id, application_id)
            .await
            .map_err(map_application_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("application {application_id} not found for this job"))
            })?;
        if !current.status.can_become(status) {
            return Err(Error::invalid_transition(format!(
                "application is already {}",
                current.status
            ))
            .with_details(json!({ "currentStatus": current.status })));
        }

        let decided = self
            .applications
            .decide(job_id, application_id, status, self.clock.utc())
            .await
            .map_err(map_application_repository_error)?
            .ok_or_else(|| {
                Error::invalid_transition("application changed before the decision was saved")
            })?;
        info!(
            job_id = %job_id,
            application_id = %application_id,
            status = %decided.status,
            "applicant decision recorded"
        );
        self.notify_decision(&job, &decided).await;
        Ok(decided)
    }
}

#[async_trait]
impl<J, A, U> JobListing for JobService<J, A, U>
where
    J: JobRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    async fn search(&self, filters: JobSearchFilters) -> Result<Vec<Job>, Error> {
        self.jobs
            .search(&filters.normalised())
            .await
            .map_err(map_job_repository_error)
    }

    async fn list_for_recruiter(&self, caller: &UserId) -> Result<Vec<Job>, Error> {
        let profile = self
            .users
            .find_by_id(caller)
            .await
            .map_err(map_user_repository_error)?;
        require_role(profile, UserRole::Recruiter)?;
        self.jobs
            .list_by_recruiter(caller)
            .await
            .map_err(map_job_repository_error)
    }

    async fn get_by_id(&self, job_id: &JobId, viewer: Option<UserId>) -> Result<Job, Error> {
        let job = self.load_job(job_id).await?;
        let is_owner = viewer.as_ref().is_some_and(|viewer| job.is_owned_by(viewer));
        if is_owner {
            return Ok(job);
        }
        if !job.is_public() {
            return Err(job_not_found(job_id));
        }
        self.record_view(job_id).await
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
