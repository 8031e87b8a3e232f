//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicationIntake, IdentityVerifier, JobLifecycle, JobListing, SavedJobs, UserProfiles,
};

/// Default upper bound for uploaded resumes (5 MiB).
pub const DEFAULT_RESUME_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub jobs: Arc<dyn JobLifecycle>,
    pub listing: Arc<dyn JobListing>,
    pub applications: Arc<dyn ApplicationIntake>,
    pub saved_jobs: Arc<dyn SavedJobs>,
    pub profiles: Arc<dyn UserProfiles>,
    pub identity: Arc<dyn IdentityVerifier>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub jobs: Arc<dyn JobLifecycle>,
    pub listing: Arc<dyn JobListing>,
    pub applications: Arc<dyn ApplicationIntake>,
    pub saved_jobs: Arc<dyn SavedJobs>,
    pub profiles: Arc<dyn UserProfiles>,
    pub identity: Arc<dyn IdentityVerifier>,
    /// Largest resume accepted by `PUT /api/users/profile`.
    pub resume_max_bytes: usize,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default upload limit.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            jobs,
            listing,
            applications,
            saved_jobs,
            profiles,
            identity,
        } = ports;
        Self {
            jobs,
            listing,
            applications,
            saved_jobs,
            profiles,
            identity,
            resume_max_bytes: DEFAULT_RESUME_MAX_BYTES,
        }
    }

    /// Override the resume size limit.
    #[must_use]
    pub fn with_resume_max_bytes(mut self, limit: usize) -> Self {
        self.resume_max_bytes = limit;
        self
    }
}
