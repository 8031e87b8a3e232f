//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`JobLifecycle`, `JobListing`, `ApplicationIntake`,
//! `SavedJobs`, `UserProfiles`) are implemented by domain services and called
//! by inbound adapters. Driven ports are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod application_intake;
mod application_repository;
mod identity_verifier;
mod job_lifecycle;
mod job_listing;
mod job_repository;
mod notifier;
mod resume_storage;
mod saved_job_repository;
mod saved_jobs;
mod user_profiles;
mod user_repository;

#[cfg(test)]
pub use application_intake::MockApplicationIntake;
pub use application_intake::{ApplicationIntake, ApplyRequest};
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityError, IdentityVerifier};
pub use job_lifecycle::JobLifecycle;
#[cfg(test)]
pub use job_lifecycle::MockJobLifecycle;
pub use job_listing::JobListing;
#[cfg(test)]
pub use job_listing::MockJobListing;
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{NoOpNotifier, Notification, Notifier, NotifierError};
#[cfg(test)]
pub use resume_storage::MockResumeStorage;
pub use resume_storage::{
    DisabledResumeStorage, ResumeStorage, ResumeStorageError, ResumeUpload, ResumeValidationError,
};
#[cfg(test)]
pub use saved_job_repository::MockSavedJobRepository;
pub use saved_job_repository::{SavedJobRepository, SavedJobRepositoryError};
#[cfg(test)]
pub use saved_jobs::MockSavedJobs;
pub use saved_jobs::SavedJobs;
#[cfg(test)]
pub use user_profiles::MockUserProfiles;
pub use user_profiles::{SyncOutcome, UserProfiles};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
