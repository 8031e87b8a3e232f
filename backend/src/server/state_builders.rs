//! Builders wiring repositories and adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use trustyhire::domain::ports::{
    ApplicationRepository, IdentityVerifier, JobRepository, Notifier, ResumeStorage,
    SavedJobRepository, UserRepository,
};
use trustyhire::domain::{ApplicationService, JobService, SavedJobService, UserProfileService};
use trustyhire::inbound::http::state::{HttpState, HttpStatePorts};
use trustyhire::outbound::persistence::{
    DieselApplicationRepository, DieselJobRepository, DieselSavedJobRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// The four repositories the services are built over.
pub(super) struct Repositories<J, A, S, U> {
    pub(super) jobs: Arc<J>,
    pub(super) applications: Arc<A>,
    pub(super) saved_jobs: Arc<S>,
    pub(super) users: Arc<U>,
}

/// Adapters shared by every service.
pub(super) struct Adapters {
    pub(super) identity: Arc<dyn IdentityVerifier>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) resumes: Arc<dyn ResumeStorage>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) resume_max_bytes: usize,
}

/// Build services over `repos` and bundle them as handler state.
pub(super) fn assemble_http_state<J, A, S, U>(
    repos: Repositories<J, A, S, U>,
    adapters: Adapters,
) -> HttpState
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    U: UserRepository + 'static,
{
    let Repositories {
        jobs,
        applications,
        saved_jobs,
        users,
    } = repos;
    let job_service = Arc::new(JobService::new(
        jobs.clone(),
        applications.clone(),
        users.clone(),
        adapters.notifier.clone(),
        adapters.clock.clone(),
    ));
    let application_service = Arc::new(ApplicationService::new(
        jobs.clone(),
        applications,
        users.clone(),
        adapters.notifier,
        adapters.clock.clone(),
    ));
    let saved_service = Arc::new(SavedJobService::new(
        jobs,
        saved_jobs,
        users.clone(),
        adapters.clock.clone(),
    ));
    let profile_service = Arc::new(UserProfileService::new(
        users,
        adapters.resumes,
        adapters.clock,
    ));

    HttpState::new(HttpStatePorts {
        jobs: job_service.clone(),
        listing: job_service,
        applications: application_service,
        saved_jobs: saved_service,
        profiles: profile_service,
        identity: adapters.identity,
    })
    .with_resume_max_bytes(adapters.resume_max_bytes)
}

/// Build the shared HTTP state over the Diesel repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = &config.db_pool;
    let repos = Repositories {
        jobs: Arc::new(DieselJobRepository::new(pool.clone())),
        applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
        saved_jobs: Arc::new(DieselSavedJobRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
    };
    let adapters = Adapters {
        identity: config.identity.clone(),
        notifier: config.notifier.clone(),
        resumes: config.resumes.clone(),
        clock: Arc::new(DefaultClock),
        resume_max_bytes: config.resume_max_bytes,
    };
    web::Data::new(assemble_http_state(repos, adapters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use trustyhire::domain::ports::{DisabledResumeStorage, NoOpNotifier};
    use trustyhire::domain::{JobSearchFilters, UserId};
    use trustyhire::test_support::{FixtureIdentity, InMemoryStore};

    fn state(limit: usize) -> HttpState {
        let store = Arc::new(InMemoryStore::default());
        assemble_http_state(
            Repositories {
                jobs: store.clone(),
                applications: store.clone(),
                saved_jobs: store.clone(),
                users: store,
            },
            Adapters {
                identity: Arc::new(FixtureIdentity::default()),
                notifier: Arc::new(NoOpNotifier),
                resumes: Arc::new(DisabledResumeStorage),
                clock: Arc::new(DefaultClock),
                resume_max_bytes: limit,
            },
        )
    }

    #[rstest]
    fn resume_limit_is_carried_into_state() {
        assert_eq!(state(1024).resume_max_bytes, 1024);
    }

    #[rstest]
    #[tokio::test]
    async fn services_share_one_store() {
        let state = state(1024);
        let listed = state
            .listing
            .search(JobSearchFilters::default())
            .await
            .expect("empty store searches");
        assert!(listed.is_empty());

        let stranger = UserId::new("user_nobody").expect("valid id");
        let err = state
            .profiles
            .get_profile(&stranger)
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), trustyhire::domain::ErrorCode::NotFound);
    }
}
