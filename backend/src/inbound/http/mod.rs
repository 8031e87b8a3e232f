//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every resource lives under `/api`. Routes with a literal segment
//! (`stats`, `ids`, `recruiter/my-jobs`) are registered before their
//! parameterised siblings.

use actix_web::{Scope, web};

use crate::domain::Error;

pub mod applicants;
pub mod applications;
pub mod auth;
pub mod error;
pub mod health;
pub mod jobs;
pub mod multipart;
pub mod payloads;
pub mod saved_jobs;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings reporting malformed bodies in the API error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("request body is not valid JSON: {err}"))
            .with_details(serde_json::json!({ "field": "body", "code": "invalid_json" }))
            .into()
    })
}

/// Query extractor settings reporting malformed query strings in the API
/// error shape.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("query string is not valid: {err}"))
            .with_details(serde_json::json!({ "field": "query", "code": "invalid_query" }))
            .into()
    })
}

/// The `/api` scope with every REST resource registered.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(json_config())
        .app_data(query_config())
        .service(jobs::create_job)
        .service(jobs::search_jobs)
        .service(jobs::list_my_jobs)
        .service(applicants::list_applicants)
        .service(applicants::applicant_stats)
        .service(applicants::get_applicant)
        .service(applicants::get_applicant_resume)
        .service(applicants::update_applicant_status)
        .service(jobs::get_job)
        .service(jobs::publish_job)
        .service(jobs::close_job)
        .service(jobs::delete_job)
        .service(applications::apply)
        .service(applications::application_status)
        .service(applications::my_applications)
        .service(saved_jobs::save_job)
        .service(saved_jobs::list_saved_jobs)
        .service(saved_jobs::saved_job_ids)
        .service(saved_jobs::check_saved_job)
        .service(saved_jobs::unsave_job)
        .service(users::sync_user)
        .service(users::get_profile)
        .service(users::update_profile)
}
