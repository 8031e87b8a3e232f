//! Application intake and recruiter applicant views.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::access::require_role;
use crate::domain::ports::{
    ApplicationIntake, ApplicationRepository, ApplyRequest, JobRepository, Notification, Notifier,
    UserRepository,
};
use crate::domain::service_support::{
    ensure_owner, invalid_field, job_not_found, map_application_repository_error,
    map_job_repository_error, map_user_repository_error, notify_best_effort,
};
use crate::domain::{
    ApplicantDetail, ApplicantSnapshot, ApplicantStats, Application, ApplicationDraft,
    ApplicationId, ApplicationStatus, ApplicationStatusView, ApplicationValidationError,
    CoverLetter, Error, Job, JobApplicant, JobApplicants, JobId, JobSnapshot, JobStatus,
    SeekerApplication, UserId, UserProfile, UserRole,
};

/// Service implementing [`ApplicationIntake`].
#[derive(Clone)]
pub struct ApplicationService<J, A, U> {
    jobs: Arc<J>,
    applications: Arc<A>,
    users: Arc<U>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl<J, A, U> ApplicationService<J, A, U> {
    /// Create an application service over the given repositories.
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

fn cover_letter(raw: &str) -> Result<CoverLetter, Error> {
    CoverLetter::new(raw).map_err(|err| {
        let code = match err {
            ApplicationValidationError::EmptyCoverLetter => "missing_field",
            ApplicationValidationError::CoverLetterTooLong { .. } => "too_long",
            ApplicationValidationError::UnknownStatus => "invalid_status",
        };
        invalid_field("coverLetter", code, err.to_string())
    })
}

impl<J, A, U> ApplicationService<J, A, U>
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

    async fn notify_recruiter(&self, job: &Job, applicant: &UserProfile) {
        notify_best_effort(
            self.notifier.as_ref(),
            Notification::ApplicationReceived {
                recruiter_email: job.recruiter_email.clone(),
                job_title: job.title.clone(),
                company_name: job.company_name.clone(),
                applicant_name: applicant.display_name().to_owned(),
            },
        )
        .await;
    }
}

#[async_trait]
impl<J, A, U> ApplicationIntake for ApplicationService<J, A, U>
where
    J: JobRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    async fn apply(
        &self,
        job_id: &JobId,
        seeker: &UserId,
        request: ApplyRequest,
    ) -> Result<Application, Error> {
        let letter = cover_letter(&request.cover_letter)?;
        let profile = self
            .users
            .find_by_id(seeker)
            .await
            .map_err(map_user_repository_error)?;
        let profile = require_role(profile, UserRole::JobSeeker)?;

        let job = self.load_job(job_id).await?;
        if job.is_owned_by(seeker) {
            return Err(Error::forbidden("you cannot apply to your own job"));
        }
        if job.status != JobStatus::Published {
            return Err(Error::invalid_transition(format!(
                "applications are only accepted while a job is published; this job is {}",
                job.status
            ))
            .with_details(json!({ "jobStatus": job.status })));
        }

        let application = Application::submit(
            ApplicationId::random(),
            *job_id,
            seeker.clone(),
            ApplicationDraft {
                cover_letter: letter,
                expected_joining_date: request.expected_joining_date,
                expected_salary: request.expected_salary,
            },
            self.clock.utc(),
        );
        self.applications
            .insert(&application)
            .await
            .map_err(map_application_repository_error)?;
        info!(
            job_id = %job_id,
            application_id = %application.id,
            "application submitted"
        );
        self.notify_recruiter(&job, &profile).await;
        Ok(application)
    }

    async fn check_status(
        &self,
        job_id: &JobId,
        seeker: &UserId,
    ) -> Result<ApplicationStatusView, Error> {
        let found = self
            .applications
            .find_for_seeker(job_id, seeker)
            .await
            .map_err(map_application_repository_error)?;
        Ok(found
            .as_ref()
            .map_or_else(ApplicationStatusView::not_applied, ApplicationStatusView::from))
    }

    async fn list_for_seeker(&self, seeker: &UserId) -> Result<Vec<SeekerApplication>, Error> {
        let applications = self
            .applications
            .list_for_seeker(seeker)
            .await
            .map_err(map_application_repository_error)?;
        let job_ids: Vec<JobId> = applications
            .iter()
            .map(|application| application.job_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let jobs: HashMap<JobId, JobSnapshot> = self
            .jobs
            .find_many(&job_ids)
            .await
            .map_err(map_job_repository_error)?
            .iter()
            .map(|job| (job.id, JobSnapshot::from(job)))
            .collect();

        Ok(applications
            .into_iter()
            .map(|application| SeekerApplication {
                job: jobs.get(&application.job_id).cloned(),
                application,
            })
            .collect())
    }

    async fn list_for_job(
        &self,
        job_id: &JobId,
        caller: &UserId,
        status: Option<ApplicationStatus>,
    ) -> Result<JobApplicants, Error> {
        let job = self.load_owned_job(job_id, caller).await?;
        let applications = self
            .applications
            .list_for_job(job_id, status)
            .await
            .map_err(map_application_repository_error)?;
        let seeker_ids: Vec<UserId> = applications
            .iter()
            .map(|application| application.seeker_id.clone())
            .collect();
        let profiles: HashMap<UserId, ApplicantSnapshot> = self
            .users
            .find_many(&seeker_ids)
            .await
            .map_err(map_user_repository_error)?
            .iter()
            .map(|profile| (profile.id.clone(), ApplicantSnapshot::from(profile)))
            .collect();

        let applicants: Vec<JobApplicant> = applications
            .into_iter()
            .map(|application| {
                let applicant = profiles.get(&application.seeker_id).cloned();
                if applicant.is_none() {
                    warn!(
                        application_id = %application.id,
                        "applicant profile missing"
                    );
                }
                JobApplicant {
                    application,
                    applicant,
                }
            })
            .collect();
        Ok(JobApplicants {
            job: job.summary(),
            total_applicants: applicants.len(),
            applicants,
        })
    }

    async fn get_for_job(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        caller: &UserId,
    ) -> Result<ApplicantDetail, Error> {
        let job = self.load_owned_job(job_id, caller).await?;
        let application = self
            .applications
            .find_in_job(job_id, application_id)
            .await
            .map_err(map_application_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("application {application_id} not found for this job"))
            })?;
        let applicant = self
            .users
            .find_by_id(&application.seeker_id)
            .await
            .map_err(map_user_repository_error)?;
        Ok(ApplicantDetail {
            job: job.summary(),
            application,
            applicant,
        })
    }

    async fn stats_for_job(
        &self,
        job_id: &JobId,
        caller: &UserId,
    ) -> Result<ApplicantStats, Error> {
        self.load_owned_job(job_id, caller).await?;
        self.applications
            .count_by_status(job_id)
            .await
            .map_err(map_application_repository_error)
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
