//! Job postings and their lifecycle.
//!
//! A job moves `draft -> published -> closed` and never backwards. Transition
//! rules live here; persistence adapters apply them as conditional updates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EmailAddress, UserId};

mod salary;

pub use salary::{SALARY_AMOUNT_MAX, Salary};

/// Validation errors raised while building jobs and filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobValidationError {
    /// A mandatory field was missing or blank.
    #[error("{field} is required")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },
    /// A text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Wire name of the offending field.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },
    /// The job type is not one of the supported values.
    #[error("jobType must be one of Full-time, Part-time, Contract, Internship, Freelance")]
    InvalidJobType,
    /// The seniority level is not one of the supported values.
    #[error("seniorityLevel must be one of Beginner, Intermediate, Expert")]
    InvalidSeniority,
    /// The salary could not be understood.
    #[error("salary is invalid: {reason}")]
    InvalidSalary {
        /// Human-readable reason.
        reason: String,
    },
}

impl JobValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::TooLong { field, .. } => field,
            Self::InvalidJobType => "jobType",
            Self::InvalidSeniority => "seniorityLevel",
            Self::InvalidSalary { .. } => "salary",
        }
    }

    /// Machine-readable error code for validation details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TooLong { .. } => "too_long",
            Self::InvalidJobType => "invalid_job_type",
            Self::InvalidSeniority => "invalid_seniority_level",
            Self::InvalidSalary { .. } => "invalid_salary",
        }
    }
}

/// Stable job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
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

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Publication state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Only visible to the owning recruiter.
    #[default]
    Draft,
    /// Listed in search and accepting applications.
    Published,
    /// No longer accepting applications.
    Closed,
}

impl JobStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status value is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status: {0}")]
pub struct UnknownJobStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownJobStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownJobStatus(other.to_owned())),
        }
    }
}

/// Employment type of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl JobType {
    /// Stable storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Freelance => "Freelance",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = JobValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-time" => Ok(Self::FullTime),
            "Part-time" => Ok(Self::PartTime),
            "Contract" => Ok(Self::Contract),
            "Internship" => Ok(Self::Internship),
            "Freelance" => Ok(Self::Freelance),
            _ => Err(JobValidationError::InvalidJobType),
        }
    }
}

/// Experience level a job targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeniorityLevel {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl SeniorityLevel {
    /// Stable storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

impl FromStr for SeniorityLevel {
    type Err = JobValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Self::Beginner),
            "Intermediate" => Ok(Self::Intermediate),
            "Expert" => Ok(Self::Expert),
            _ => Err(JobValidationError::InvalidSeniority),
        }
    }
}

/// Maximum length of a job title.
pub const TITLE_MAX: usize = 200;
/// Maximum length of a job description.
pub const DESCRIPTION_MAX: usize = 20_000;

/// Recruiter-supplied fields for a new job.
///
/// Mandatory fields are optional here so a missing value surfaces as a
/// validation error naming the field instead of a deserialisation failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub category: Option<String>,
    pub job_type: Option<JobType>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub salary: Option<Salary>,
    pub seniority_level: Option<SeniorityLevel>,
}

fn required(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<String, JobValidationError> {
    let trimmed = value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .ok_or(JobValidationError::MissingField { field })?;
    if trimmed.chars().count() > max {
        return Err(JobValidationError::TooLong { field, max });
    }
    Ok(trimmed)
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Lifecycle transitions a recruiter may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTransition {
    /// `draft -> published`.
    Publish,
    /// `published -> closed`.
    Close,
}

impl JobTransition {
    /// Status the job must currently hold.
    pub fn from_status(self) -> JobStatus {
        match self {
            Self::Publish => JobStatus::Draft,
            Self::Close => JobStatus::Published,
        }
    }

    /// Status the job holds afterwards.
    pub fn to_status(self) -> JobStatus {
        match self {
            Self::Publish => JobStatus::Published,
            Self::Close => JobStatus::Closed,
        }
    }

    /// Verb used in log and error messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Close => "close",
        }
    }
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub recruiter_id: UserId,
    pub recruiter_email: EmailAddress,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub category: String,
    pub job_type: JobType,
    pub location: String,
    pub salary: Option<Salary>,
    pub seniority_level: SeniorityLevel,
    pub status: JobStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Validate `fields` and build a new draft owned by `recruiter_id`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use trustyhire::domain::{EmailAddress, Job, JobFields, JobId, JobStatus, JobType, UserId};
    ///
    /// let fields = JobFields {
    ///     title: Some("Backend Engineer".into()),
    ///     description: Some("Build APIs".into()),
    ///     category: Some("Engineering".into()),
    ///     job_type: Some(JobType::FullTime),
    ///     location: Some("Remote".into()),
    ///     company_name: Some("Acme".into()),
    ///     ..JobFields::default()
    /// };
    /// let job = Job::draft(
    ///     JobId::random(),
    ///     UserId::new("user_r").unwrap(),
    ///     EmailAddress::new("r@acme.io").unwrap(),
    ///     fields,
    ///     Utc::now(),
    /// )
    /// .unwrap();
    /// assert_eq!(job.status, JobStatus::Draft);
    /// assert!(job.published_at.is_none());
    /// ```
    pub fn draft(
        id: JobId,
        recruiter_id: UserId,
        recruiter_email: EmailAddress,
        fields: JobFields,
        now: DateTime<Utc>,
    ) -> Result<Self, JobValidationError> {
        let title = required(fields.title, "title", TITLE_MAX)?;
        let description = required(fields.description, "description", DESCRIPTION_MAX)?;
        let category = required(fields.category, "category", TITLE_MAX)?;
        let job_type = fields
            .job_type
            .ok_or(JobValidationError::MissingField { field: "jobType" })?;
        let location = required(fields.location, "location", TITLE_MAX)?;
        let company_name = required(fields.company_name, "companyName", TITLE_MAX)?;

        Ok(Self {
            id,
            recruiter_id,
            recruiter_email,
            company_name,
            title,
            description,
            responsibilities: clean_list(fields.responsibilities),
            requirements: clean_list(fields.requirements),
            category,
            job_type,
            location,
            salary: fields.salary,
            seniority_level: fields.seniority_level.unwrap_or_default(),
            status: JobStatus::Draft,
            published_at: None,
            closed_at: None,
            views: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether `user` owns this job.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.recruiter_id == user
    }

    /// Whether the job is visible to users other than its owner.
    pub fn is_public(&self) -> bool {
        self.status != JobStatus::Draft
    }

    /// Whether `transition` is legal from the current status.
    pub fn permits(&self, transition: JobTransition) -> bool {
        self.status == transition.from_status()
    }

    /// Apply `transition` in memory, stamping the matching timestamp.
    ///
    /// Returns `false` and leaves the job untouched when the transition is
    /// not legal from the current status.
    pub fn transition(&mut self, transition: JobTransition, at: DateTime<Utc>) -> bool {
        if !self.permits(transition) {
            return false;
        }
        self.status = transition.to_status();
        match transition {
            JobTransition::Publish => self.published_at = Some(at),
            JobTransition::Close => self.closed_at = Some(at),
        }
        self.updated_at = at;
        true
    }

    /// Compact summary embedded in applicant listings.
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id,
            title: self.title.clone(),
            company_name: self.company_name.clone(),
            status: self.status,
        }
    }
}

/// Compact job reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub company_name: String,
    pub status: JobStatus,
}

/// Search filters over published jobs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSearchFilters {
    /// Case-insensitive substring of the title.
    pub keyword: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Exact employment type.
    pub job_type: Option<JobType>,
}

impl JobSearchFilters {
    /// Trim text filters and drop blank ones.
    #[must_use]
    pub fn normalised(self) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };
        Self {
            keyword: clean(self.keyword),
            location: clean(self.location),
            category: clean(self.category),
            job_type: self.job_type,
        }
    }

    /// Whether `job` satisfies every supplied filter.
    ///
    /// Only published jobs ever match.
    pub fn matches(&self, job: &Job) -> bool {
        if job.status != JobStatus::Published {
            return false;
        }
        let keyword_ok = self.keyword.as_ref().is_none_or(|keyword| {
            job.title.to_lowercase().contains(&keyword.to_lowercase())
        });
        let location_ok = self.location.as_ref().is_none_or(|loc| &job.location == loc);
        let category_ok = self.category.as_ref().is_none_or(|cat| &job.category == cat);
        let type_ok = self.job_type.is_none_or(|kind| job.job_type == kind);
        keyword_ok && location_ok && category_ok && type_ok
    }
}
