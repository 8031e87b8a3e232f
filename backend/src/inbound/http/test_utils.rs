//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{AUTHORIZATION, HeaderName};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::UserId;
use crate::domain::ports::{
    IdentityError, MockApplicationIntake, MockIdentityVerifier, MockJobLifecycle,
    MockJobListing, MockSavedJobs, MockUserProfiles,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

const TOKEN_PREFIX: &str = "token-for:";

/// Mocked driving ports; tests set expectations before building state.
#[derive(Default)]
pub struct TestPorts {
    pub jobs: MockJobLifecycle,
    pub listing: MockJobListing,
    pub applications: MockApplicationIntake,
    pub saved_jobs: MockSavedJobs,
    pub profiles: MockUserProfiles,
}

impl TestPorts {
    /// Build handler state whose identity port trusts [`bearer_for`] tokens.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            jobs: Arc::new(self.jobs),
            listing: Arc::new(self.listing),
            applications: Arc::new(self.applications),
            saved_jobs: Arc::new(self.saved_jobs),
            profiles: Arc::new(self.profiles),
            identity: Arc::new(token_identity()),
        })
    }
}

/// Identity mock accepting tokens minted by [`bearer_for`].
pub fn token_identity() -> MockIdentityVerifier {
    let mut identity = MockIdentityVerifier::new();
    identity.expect_verify().returning(|token| {
        let subject = token
            .strip_prefix(TOKEN_PREFIX)
            .ok_or_else(|| IdentityError::invalid_token("unknown token"))?;
        UserId::new(subject).map_err(|err| IdentityError::invalid_subject(err.to_string()))
    });
    identity
}

/// State with unconfigured use-case mocks and the given identity port.
pub fn state_with_identity(identity: MockIdentityVerifier) -> HttpState {
    let mut state = TestPorts::default().into_state();
    state.identity = Arc::new(identity);
    state
}

/// `Authorization` header carrying a token for `user`.
pub fn bearer_for(user: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TOKEN_PREFIX}{user}"))
}

/// App serving the `/api` scope against `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(api_scope())
}

/// `details.code` of an error body.
pub fn detail_code(body: &Value) -> Option<&str> {
    body.get("details")
        .and_then(|details| details.get("code"))
        .and_then(Value::as_str)
}
