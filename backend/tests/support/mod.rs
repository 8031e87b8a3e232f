//! Shared harness for end-to-end HTTP flows over the in-memory store.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! one declares `mod support;` and drives the real `/api` scope with tokens
//! from [`mint_token`].

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use trustyhire::Trace;
use trustyhire::domain::{ApplicationService, JobService, SavedJobService, UserProfileService};
use trustyhire::inbound::http::api_scope;
use trustyhire::inbound::http::state::{HttpState, HttpStatePorts};
use trustyhire::test_support::{
    FixtureIdentity, InMemoryStore, MemoryResumeStorage, MutableClock, RecordingNotifier,
    mint_token,
};

/// Everything a flow needs to inspect after driving requests.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MutableClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub resumes: Arc<MemoryResumeStorage>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            store: Arc::new(InMemoryStore::default()),
            clock: Arc::new(MutableClock::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            resumes: Arc::new(MemoryResumeStorage::default()),
        }
    }
}

impl Harness {
    /// Handler state with every service built over the shared store.
    pub fn state(&self) -> HttpState {
        let store = &self.store;
        let jobs = Arc::new(JobService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            self.notifier.clone(),
            self.clock.clone(),
        ));
        HttpState::new(HttpStatePorts {
            jobs: jobs.clone(),
            listing: jobs,
            applications: Arc::new(ApplicationService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                self.notifier.clone(),
                self.clock.clone(),
            )),
            saved_jobs: Arc::new(SavedJobService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                self.clock.clone(),
            )),
            profiles: Arc::new(UserProfileService::new(
                store.clone(),
                self.resumes.clone(),
                self.clock.clone(),
            )),
            identity: Arc::new(FixtureIdentity::default()),
        })
    }
}

/// Initialise the app under test.
pub async fn init(
    harness: &Harness,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state()))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

/// `Authorization` header value for `user`.
pub fn bearer(user: &str) -> (actix_web::http::header::HeaderName, String) {
    let token = mint_token(user).expect("fixture token signs");
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Send `request` and return the status with the JSON body, if any.
pub async fn send<S>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Sync `user` with `role`, returning the profile body.
pub async fn sync<S>(app: &S, user: &str, email: &str, role: &str, extra: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut body = json!({ "email": email, "role": role });
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
        target.extend(fields);
    }
    let request = actix_test::TestRequest::post()
        .uri("/api/users/sync")
        .insert_header(bearer(user))
        .set_json(body)
        .to_request();
    let (status, profile) = send(app, request).await;
    assert!(status.is_success(), "sync failed: {status} {profile}");
    profile
}

/// Create a draft job owned by `recruiter`, returning its id.
pub async fn draft_job<S>(app: &S, recruiter: &str, title: &str, location: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(bearer(recruiter))
        .set_json(json!({
            "title": title,
            "description": "Own the hiring platform backend.",
            "responsibilities": ["Design APIs", "Review code"],
            "requirements": "Rust, PostgreSQL",
            "category": "Engineering",
            "jobType": "Full-time",
            "location": location,
            "salary": { "min": 90000, "max": 120000, "currency": "EUR" },
            "seniorityLevel": "Intermediate"
        }))
        .to_request();
    let (status, job) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {job}");
    job["id"].as_str().expect("job id").to_owned()
}

/// Create and publish a job owned by `recruiter`, returning its id.
pub async fn published_job<S>(app: &S, recruiter: &str, title: &str, location: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let job_id = draft_job(app, recruiter, title, location).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/jobs/{job_id}/publish"))
        .insert_header(bearer(recruiter))
        .to_request();
    let (status, job) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "publish failed: {job}");
    job_id
}
