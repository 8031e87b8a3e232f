//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.
#![expect(
    dead_code,
    reason = "Schema mirrors are only read by utoipa when generating OpenAPI"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The seeker already applied to the job.
    #[schema(rename = "duplicate_application")]
    DuplicateApplication,
    /// The job is already bookmarked.
    #[schema(rename = "already_saved")]
    AlreadySaved,
    /// The job or application is not in a state that allows the change.
    #[schema(rename = "invalid_transition")]
    InvalidTransition,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service failed; the request may be retried.
    #[schema(rename = "unavailable")]
    Unavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "coverLetter must not be empty")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Supplementary details such as `field`, `code`, `alreadyApplied` or
    /// `retryable`.
    #[schema(example = json!({ "field": "coverLetter", "code": "missing_field" }))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Salary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Salary, rename_all = "camelCase")]
pub struct SalarySchema {
    #[schema(example = 50000)]
    min: Option<u32>,
    #[schema(example = 70000)]
    max: Option<u32>,
    /// ISO 4217 code, upper-case.
    #[schema(example = "USD")]
    currency: String,
    negotiable: bool,
}

/// OpenAPI schema for [`crate::domain::Job`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Job, rename_all = "camelCase")]
pub struct JobSchema {
    #[schema(format = Uuid)]
    id: String,
    #[schema(example = "auth0|5f7c8ec7c33c6c004bbafe82")]
    recruiter_id: String,
    recruiter_email: String,
    #[schema(example = "Acme")]
    company_name: String,
    #[schema(example = "Backend Engineer")]
    title: String,
    description: String,
    responsibilities: Vec<String>,
    requirements: Vec<String>,
    category: String,
    /// `Full-time`, `Part-time`, `Contract`, `Internship` or `Freelance`.
    #[schema(example = "Full-time")]
    job_type: String,
    #[schema(example = "Remote")]
    location: String,
    salary: Option<SalarySchema>,
    /// `Beginner`, `Intermediate` or `Expert`.
    seniority_level: String,
    /// `draft`, `published` or `closed`.
    #[schema(example = "published")]
    status: String,
    #[schema(format = DateTime)]
    published_at: Option<String>,
    #[schema(format = DateTime)]
    closed_at: Option<String>,
    views: u64,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::JobSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JobSummary, rename_all = "camelCase")]
pub struct JobSummarySchema {
    #[schema(format = Uuid)]
    id: String,
    title: String,
    company_name: String,
    status: String,
}

/// OpenAPI schema for [`crate::domain::JobSnapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JobSnapshot, rename_all = "camelCase")]
pub struct JobSnapshotSchema {
    #[schema(format = Uuid)]
    id: String,
    title: String,
    company_name: String,
    location: String,
    salary: Option<SalarySchema>,
    job_type: String,
    status: String,
}

/// OpenAPI schema for [`crate::domain::Application`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Application, rename_all = "camelCase")]
pub struct ApplicationSchema {
    #[schema(format = Uuid)]
    id: String,
    #[schema(format = Uuid)]
    job_id: String,
    seeker_id: String,
    cover_letter: String,
    #[schema(format = Date)]
    expected_joining_date: Option<String>,
    expected_salary: Option<String>,
    /// `Pending`, `Accepted` or `Rejected`.
    #[schema(example = "Pending")]
    status: String,
    #[schema(format = DateTime)]
    applied_at: String,
    #[schema(format = DateTime)]
    decided_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ApplicationStatusView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicationStatusView, rename_all = "camelCase")]
pub struct ApplicationStatusViewSchema {
    has_applied: bool,
    #[schema(format = Uuid)]
    application_id: Option<String>,
    status: Option<String>,
    #[schema(format = DateTime)]
    applied_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::SeekerApplication`].
///
/// The application fields sit next to the job snapshot.
#[derive(ToSchema)]
#[schema(as = crate::domain::SeekerApplication, rename_all = "camelCase")]
pub struct SeekerApplicationSchema {
    #[schema(format = Uuid)]
    id: String,
    #[schema(format = Uuid)]
    job_id: String,
    seeker_id: String,
    cover_letter: String,
    #[schema(format = Date)]
    expected_joining_date: Option<String>,
    expected_salary: Option<String>,
    status: String,
    #[schema(format = DateTime)]
    applied_at: String,
    #[schema(format = DateTime)]
    decided_at: Option<String>,
    /// `null` when the job has since been deleted.
    job: Option<JobSnapshotSchema>,
}

/// OpenAPI schema for [`crate::domain::ResumeRef`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ResumeRef, rename_all = "camelCase")]
pub struct ResumeRefSchema {
    #[schema(example = "trustyhire/resumes/user_1-cv")]
    public_id: String,
    url: String,
}

/// OpenAPI schema for [`crate::domain::ApplicantSnapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicantSnapshot)]
pub struct ApplicantSnapshotSchema {
    name: String,
    email: String,
    resume: Option<ResumeRefSchema>,
}

/// OpenAPI schema for [`crate::domain::JobApplicant`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JobApplicant, rename_all = "camelCase")]
pub struct JobApplicantSchema {
    #[schema(format = Uuid)]
    id: String,
    #[schema(format = Uuid)]
    job_id: String,
    seeker_id: String,
    cover_letter: String,
    #[schema(format = Date)]
    expected_joining_date: Option<String>,
    expected_salary: Option<String>,
    status: String,
    #[schema(format = DateTime)]
    applied_at: String,
    #[schema(format = DateTime)]
    decided_at: Option<String>,
    applicant: Option<ApplicantSnapshotSchema>,
}

/// OpenAPI schema for [`crate::domain::JobApplicants`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JobApplicants, rename_all = "camelCase")]
pub struct JobApplicantsSchema {
    job: JobSummarySchema,
    total_applicants: usize,
    applicants: Vec<JobApplicantSchema>,
}

/// OpenAPI schema for [`crate::domain::ApplicantStats`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicantStats)]
pub struct ApplicantStatsSchema {
    total: u64,
    pending: u64,
    accepted: u64,
    rejected: u64,
}

/// OpenAPI schema for [`crate::domain::UserProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile, rename_all = "camelCase")]
pub struct UserProfileSchema {
    id: String,
    email: String,
    name: Option<String>,
    /// `job_seeker` or `recruiter`.
    #[schema(example = "job_seeker")]
    role: String,
    company_name: Option<String>,
    company_website: Option<String>,
    bio: Option<String>,
    skills: Vec<String>,
    gender: Option<String>,
    #[schema(format = Date)]
    date_of_birth: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    desired_job_title: Option<String>,
    preferred_category: Option<String>,
    preferred_location: Option<String>,
    expected_salary: Option<String>,
    job_type_preference: Option<String>,
    education: Vec<serde_json::Value>,
    experience: Vec<serde_json::Value>,
    resume: Option<ResumeRefSchema>,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::ApplicantDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicantDetail)]
pub struct ApplicantDetailSchema {
    job: JobSummarySchema,
    application: ApplicationSchema,
    applicant: Option<UserProfileSchema>,
}

/// OpenAPI schema for [`crate::domain::SavedJob`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SavedJob, rename_all = "camelCase")]
pub struct SavedJobSchema {
    user_id: String,
    #[schema(format = Uuid)]
    job_id: String,
    job_title: String,
    company_name: String,
    #[schema(format = DateTime)]
    saved_at: String,
}

/// OpenAPI schema for [`crate::domain::SavedJobEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SavedJobEntry, rename_all = "camelCase")]
pub struct SavedJobEntrySchema {
    user_id: String,
    #[schema(format = Uuid)]
    job_id: String,
    job_title: String,
    company_name: String,
    #[schema(format = DateTime)]
    saved_at: String,
    job: JobSnapshotSchema,
}

/// OpenAPI schema for [`crate::domain::SavedJobStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SavedJobStatus, rename_all = "camelCase")]
pub struct SavedJobStatusSchema {
    is_saved: bool,
}
