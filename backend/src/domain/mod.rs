//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: hold the hiring rules independent of HTTP and storage. Entities
//! serialise with camelCase field names; adapters map [`Error`] codes onto
//! their own transport.
//!
//! Public surface:
//! - [`Job`] with its `draft -> published -> closed` lifecycle.
//! - [`Application`] with its `Pending -> Accepted | Rejected` decision.
//! - [`SavedJob`] bookmarks and [`UserProfile`] identities.
//! - Services implementing the driving ports in [`ports`].

mod access;
pub mod application;
pub mod application_service;
pub mod error;
pub mod job;
pub mod job_service;
pub mod ports;
pub mod saved_job;
pub mod saved_job_service;
#[cfg(test)]
pub(crate) mod service_test_helpers;
mod service_support;
pub mod trace_id;
pub mod user;
pub mod user_profile_service;

pub use self::application::{
    ApplicantDetail, ApplicantSnapshot, ApplicantStats, Application, ApplicationDraft,
    ApplicationId, ApplicationStatus, ApplicationStatusView, ApplicationValidationError,
    COVER_LETTER_MAX, CoverLetter, JobApplicant, JobApplicants, JobSnapshot, SeekerApplication,
};
pub use self::application_service::ApplicationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::job::{
    Job, JobFields, JobId, JobSearchFilters, JobStatus, JobSummary, JobTransition, JobType,
    JobValidationError, SALARY_AMOUNT_MAX, Salary, SeniorityLevel, UnknownJobStatus,
};
pub use self::job_service::JobService;
pub use self::saved_job::{SavedJob, SavedJobEntry, SavedJobStatus};
pub use self::saved_job_service::SavedJobService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Education, EmailAddress, Experience, ProfileChanges, ProfileSync, ResumeRef, UserId,
    UserProfile, UserRole, UserValidationError,
};
pub use self::user_profile_service::UserProfileService;
