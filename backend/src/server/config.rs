//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use trustyhire::domain::ports::{
    DisabledResumeStorage, IdentityVerifier, NoOpNotifier, Notifier, ResumeStorage,
};
use trustyhire::inbound::http::state::DEFAULT_RESUME_MAX_BYTES;
use trustyhire::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) identity: Arc<dyn IdentityVerifier>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) resumes: Arc<dyn ResumeStorage>,
    pub(crate) resume_max_bytes: usize,
}

impl ServerConfig {
    /// Construct a server configuration with mail and resume storage
    /// disabled.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        db_pool: DbPool,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            bind_addr,
            db_pool,
            identity,
            notifier: Arc::new(NoOpNotifier),
            resumes: Arc::new(DisabledResumeStorage),
            resume_max_bytes: DEFAULT_RESUME_MAX_BYTES,
        }
    }

    /// Deliver application notifications through `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Store uploaded resumes through `resumes`.
    #[must_use]
    pub fn with_resume_storage(mut self, resumes: Arc<dyn ResumeStorage>) -> Self {
        self.resumes = resumes;
        self
    }

    /// Override the largest accepted resume.
    #[must_use]
    pub fn with_resume_max_bytes(mut self, limit: usize) -> Self {
        self.resume_max_bytes = limit;
        self
    }
}
