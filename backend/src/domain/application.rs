//! Applications linking one seeker to one job.
//!
//! Status moves once from `Pending` to a terminal `Accepted` or `Rejected`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    EmailAddress, JobId, JobStatus, JobSummary, JobType, ResumeRef, Salary, UserId, UserProfile,
};

/// Maximum length of a cover letter.
pub const COVER_LETTER_MAX: usize = 5_000;

/// Validation errors raised while building applications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    /// The cover letter was empty after trimming.
    #[error("coverLetter must not be empty")]
    EmptyCoverLetter,
    /// The cover letter exceeded the maximum length.
    #[error("coverLetter must be at most {max} characters")]
    CoverLetterTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The status value is not recognised.
    #[error("status must be one of Pending, Accepted, Rejected")]
    UnknownStatus,
}

/// Stable application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Recruiter decision on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Terminal: the seeker was accepted.
    Accepted,
    /// Terminal: the seeker was rejected.
    Rejected,
}

impl ApplicationStatus {
    /// Stable storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether no further decision can be recorded.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether moving from `self` to `next` is a legal decision.
    ///
    /// # Examples
    /// ```
    /// use trustyhire::domain::ApplicationStatus;
    ///
    /// assert!(ApplicationStatus::Pending.can_become(ApplicationStatus::Accepted));
    /// assert!(!ApplicationStatus::Accepted.can_become(ApplicationStatus::Rejected));
    /// assert!(!ApplicationStatus::Pending.can_become(ApplicationStatus::Pending));
    /// ```
    pub fn can_become(self, next: Self) -> bool {
        self == Self::Pending && next.is_terminal()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(ApplicationValidationError::UnknownStatus),
        }
    }
}

/// Non-empty, trimmed cover letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoverLetter(String);

impl CoverLetter {
    /// Validate and construct a cover letter.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ApplicationValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApplicationValidationError::EmptyCoverLetter);
        }
        if trimmed.chars().count() > COVER_LETTER_MAX {
            return Err(ApplicationValidationError::CoverLetterTooLong {
                max: COVER_LETTER_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CoverLetter {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CoverLetter> for String {
    fn from(value: CoverLetter) -> Self {
        value.0
    }
}

impl TryFrom<String> for CoverLetter {
    type Error = ApplicationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Seeker-supplied application fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub cover_letter: CoverLetter,
    pub expected_joining_date: Option<NaiveDate>,
    pub expected_salary: Option<String>,
}

/// Stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub seeker_id: UserId,
    pub cover_letter: CoverLetter,
    pub expected_joining_date: Option<NaiveDate>,
    pub expected_salary: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Create a pending application.
    pub fn submit(
        id: ApplicationId,
        job_id: JobId,
        seeker_id: UserId,
        draft: ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            job_id,
            seeker_id,
            cover_letter: draft.cover_letter,
            expected_joining_date: draft.expected_joining_date,
            expected_salary: draft
                .expected_salary
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty()),
            status: ApplicationStatus::Pending,
            applied_at: now,
            decided_at: None,
        }
    }

    /// Record a terminal decision in memory.
    ///
    /// Returns `false` and leaves the application untouched when the
    /// decision is not legal.
    pub fn decide(&mut self, next: ApplicationStatus, at: DateTime<Utc>) -> bool {
        if !self.status.can_become(next) {
            return false;
        }
        self.status = next;
        self.decided_at = Some(at);
        true
    }
}

/// Seeker-facing application state for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusView {
    pub has_applied: bool,
    pub application_id: Option<ApplicationId>,
    pub status: Option<ApplicationStatus>,
    pub applied_at: Option<DateTime<Utc>>,
}

impl ApplicationStatusView {
    /// View for a seeker who has not applied.
    pub fn not_applied() -> Self {
        Self {
            has_applied: false,
            application_id: None,
            status: None,
            applied_at: None,
        }
    }
}

impl From<&Application> for ApplicationStatusView {
    fn from(value: &Application) -> Self {
        Self {
            has_applied: true,
            application_id: Some(value.id),
            status: Some(value.status),
            applied_at: Some(value.applied_at),
        }
    }
}

/// Read-time snapshot of a job shown alongside a seeker's application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub id: JobId,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub salary: Option<Salary>,
    pub job_type: JobType,
    pub status: JobStatus,
}

impl From<&crate::domain::Job> for JobSnapshot {
    fn from(job: &crate::domain::Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            location: job.location.clone(),
            salary: job.salary.clone(),
            job_type: job.job_type,
            status: job.status,
        }
    }
}

/// Application enriched for the seeker's own listing.
///
/// `job` is `None` when the job no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerApplication {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<JobSnapshot>,
}

/// Privacy-limited view of an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSnapshot {
    pub name: String,
    pub email: EmailAddress,
    pub resume: Option<ResumeRef>,
}

impl From<&UserProfile> for ApplicantSnapshot {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.display_name().to_owned(),
            email: profile.email.clone(),
            resume: profile.resume.clone(),
        }
    }
}

/// Application enriched for the owning recruiter.
///
/// `applicant` is `None` when the seeker's profile is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicant {
    #[serde(flatten)]
    pub application: Application,
    pub applicant: Option<ApplicantSnapshot>,
}

/// All applicants for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicants {
    pub job: JobSummary,
    pub total_applicants: usize,
    pub applicants: Vec<JobApplicant>,
}

/// One applicant with their full profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetail {
    pub job: JobSummary,
    pub application: Application,
    pub applicant: Option<UserProfile>,
}

/// Per-status application counts for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantStats {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
    pub rejected: u64,
}

impl ApplicantStats {
    /// Add `count` applications in `status`.
    pub fn record(&mut self, status: ApplicationStatus, count: u64) {
        match status {
            ApplicationStatus::Pending => self.pending += count,
            ApplicationStatus::Accepted => self.accepted += count,
            ApplicationStatus::Rejected => self.rejected += count,
        }
        self.total += count;
    }
}
