//! Driving port for application intake and applicant read paths.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    ApplicantDetail, ApplicantStats, Application, ApplicationId, ApplicationStatus,
    ApplicationStatusView, Error, JobApplicants, JobId, SeekerApplication, UserId,
};

/// Seeker input for an application, validated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyRequest {
    pub cover_letter: String,
    pub expected_joining_date: Option<NaiveDate>,
    pub expected_salary: Option<String>,
}

/// Application intake use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationIntake: Send + Sync {
    /// Apply `seeker` to a published job.
    async fn apply(
        &self,
        job_id: &JobId,
        seeker: &UserId,
        request: ApplyRequest,
    ) -> Result<Application, Error>;

    /// Whether `seeker` applied to the job and with what outcome.
    async fn check_status(
        &self,
        job_id: &JobId,
        seeker: &UserId,
    ) -> Result<ApplicationStatusView, Error>;

    /// Every application by `seeker`, newest first, with a job snapshot.
    async fn list_for_seeker(&self, seeker: &UserId) -> Result<Vec<SeekerApplication>, Error>;

    /// Applicants for a job owned by `caller`.
    async fn list_for_job(
        &self,
        job_id: &JobId,
        caller: &UserId,
        status: Option<ApplicationStatus>,
    ) -> Result<JobApplicants, Error>;

    /// One applicant with their full profile.
    async fn get_for_job(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        caller: &UserId,
    ) -> Result<ApplicantDetail, Error>;

    /// Per-status counts for a job owned by `caller`.
    async fn stats_for_job(&self, job_id: &JobId, caller: &UserId)
    -> Result<ApplicantStats, Error>;
}
