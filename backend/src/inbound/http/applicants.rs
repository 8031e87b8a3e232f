//! Recruiter-facing applicant handlers.
//!
//! ```text
//! GET /api/jobs/{jobId}/applicants?status=Pending
//! GET /api/jobs/{jobId}/applicants/stats
//! GET /api/jobs/{jobId}/applicants/{applicantId}
//! GET /api/jobs/{jobId}/applicants/{applicantId}/resume
//! PATCH /api/jobs/{jobId}/applicants/{applicantId}/status {"status":"Accepted"}
//! ```
//!
//! `applicantId` is the application identifier. Every route is restricted to
//! the recruiter owning the job; the services enforce that.

use actix_web::{get, patch, web};

use crate::domain::{
    ApplicantDetail, ApplicantStats, Application, ApplicationId, Error, JobApplicants, JobId,
    ResumeRef,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::jobs::JOB_ID;
use crate::inbound::http::payloads::{ApplicantFilter, StatusBody};
use crate::inbound::http::schemas::{
    ApplicantDetailSchema, ApplicantStatsSchema, ApplicationSchema, ErrorSchema,
    JobApplicantsSchema, ResumeRefSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_application_id, parse_job_id};

const APPLICANT_ID: FieldName = FieldName::new("applicantId");

fn parse_ids(path: web::Path<(String, String)>) -> Result<(JobId, ApplicationId), Error> {
    let (job_id, applicant_id) = path.into_inner();
    Ok((
        parse_job_id(&job_id, JOB_ID)?,
        parse_application_id(&applicant_id, APPLICANT_ID)?,
    ))
}

/// Applicants for one of the caller's jobs.
#[utoipa::path(
    get,
    path = "/api/jobs/{jobId}/applicants",
    params(
        ("jobId" = String, Path, description = "Job identifier", format = Uuid),
        ApplicantFilter
    ),
    responses(
        (status = 200, description = "Applicants", body = JobApplicantsSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applicants"],
    operation_id = "listApplicants",
    security(("BearerAuth" = []))
)]
#[get("/jobs/{job_id}/applicants")]
pub async fn list_applicants(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    filter: web::Query<ApplicantFilter>,
) -> ApiResult<web::Json<JobApplicants>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let status = filter.into_inner().status()?;
    let applicants = state
        .applications
        .list_for_job(&job_id, caller.id(), status)
        .await?;
    Ok(web::Json(applicants))
}

/// Per-status applicant counts.
#[utoipa::path(
    get,
    path = "/api/jobs/{jobId}/applicants/stats",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 200, description = "Applicant counts", body = ApplicantStatsSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applicants"],
    operation_id = "applicantStats",
    security(("BearerAuth" = []))
)]
#[get("/jobs/{job_id}/applicants/stats")]
pub async fn applicant_stats(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApplicantStats>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let stats = state.applications.stats_for_job(&job_id, caller.id()).await?;
    Ok(web::Json(stats))
}

/// One applicant with their full profile.
#[utoipa::path(
    get,
    path = "/api/jobs/{jobId}/applicants/{applicantId}",
    params(
        ("jobId" = String, Path, description = "Job identifier", format = Uuid),
        ("applicantId" = String, Path, description = "Application identifier", format = Uuid)
    ),
    responses(
        (status = 200, description = "Applicant", body = ApplicantDetailSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applicants"],
    operation_id = "getApplicant",
    security(("BearerAuth" = []))
)]
#[get("/jobs/{job_id}/applicants/{applicant_id}")]
pub async fn get_applicant(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ApplicantDetail>> {
    let (job_id, application_id) = parse_ids(path)?;
    let detail = state
        .applications
        .get_for_job(&job_id, &application_id, caller.id())
        .await?;
    Ok(web::Json(detail))
}

/// Where the applicant's resume is stored.
#[utoipa::path(
    get,
    path = "/api/jobs/{jobId}/applicants/{applicantId}/resume",
    params(
        ("jobId" = String, Path, description = "Job identifier", format = Uuid),
        ("applicantId" = String, Path, description = "Application identifier", format = Uuid)
    ),
    responses(
        (status = 200, description = "Resume reference", body = ResumeRefSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "No resume on file", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applicants"],
    operation_id = "getApplicantResume",
    security(("BearerAuth" = []))
)]
#[get("/jobs/{job_id}/applicants/{applicant_id}/resume")]
pub async fn get_applicant_resume(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ResumeRef>> {
    let (job_id, application_id) = parse_ids(path)?;
    let detail = state
        .applications
        .get_for_job(&job_id, &application_id, caller.id())
        .await?;
    detail
        .applicant
        .and_then(|profile| profile.resume)
        .map(web::Json)
        .ok_or_else(|| Error::not_found("applicant has no resume on file"))
}

/// Accept or reject a pending application.
#[utoipa::path(
    patch,
    path = "/api/jobs/{jobId}/applicants/{applicantId}/status",
    params(
        ("jobId" = String, Path, description = "Job identifier", format = Uuid),
        ("applicantId" = String, Path, description = "Application identifier", format = Uuid)
    ),
    request_body = StatusBody,
    responses(
        (status = 200, description = "Decision recorded", body = ApplicationSchema),
        (status = 400, description = "Invalid request or decision already made", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applicants"],
    operation_id = "updateApplicantStatus",
    security(("BearerAuth" = []))
)]
#[patch("/jobs/{job_id}/applicants/{applicant_id}/status")]
pub async fn update_applicant_status(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<StatusBody>,
) -> ApiResult<web::Json<Application>> {
    let (job_id, application_id) = parse_ids(path)?;
    let status = payload.into_inner().decision()?;
    let application = state
        .jobs
        .update_applicant_status(&job_id, &application_id, status, caller.id())
        .await?;
    Ok(web::Json(application))
}
