//! Job HTTP handlers.
//!
//! ```text
//! POST /api/jobs
//! GET /api/jobs?keyword=engineer&type=Full-time
//! GET /api/jobs/recruiter/my-jobs
//! GET /api/jobs/{jobId}
//! PATCH /api/jobs/{jobId}/publish
//! PATCH /api/jobs/{jobId}/close
//! DELETE /api/jobs/{jobId}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::{Job, JobFields, JobSearchFilters};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthenticatedUser, OptionalUser};
use crate::inbound::http::payloads::{JobBody, JobSearchQuery};
use crate::inbound::http::schemas::{ErrorSchema, JobSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_job_id};

pub(crate) const JOB_ID: FieldName = FieldName::new("jobId");

/// Create a draft job owned by the caller.
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = JobBody,
    responses(
        (status = 201, description = "Draft created", body = JobSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller is not a recruiter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "createJob",
    security(("BearerAuth" = []))
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<JobBody>,
) -> ApiResult<HttpResponse> {
    let fields = JobFields::try_from(payload.into_inner())?;
    let job = state.jobs.create_draft(caller.id(), fields).await?;
    Ok(HttpResponse::Created().json(job))
}

/// Search published jobs, newest first.
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(JobSearchQuery),
    responses(
        (status = 200, description = "Matching jobs", body = [JobSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "searchJobs",
    security([])
)]
#[get("/jobs")]
pub async fn search_jobs(
    state: web::Data<HttpState>,
    query: web::Query<JobSearchQuery>,
) -> ApiResult<web::Json<Vec<Job>>> {
    let filters = JobSearchFilters::try_from(query.into_inner())?;
    let jobs = state.listing.search(filters).await?;
    Ok(web::Json(jobs))
}

/// Every job owned by the calling recruiter, newest first.
#[utoipa::path(
    get,
    path = "/api/jobs/recruiter/my-jobs",
    responses(
        (status = 200, description = "Recruiter's jobs", body = [JobSchema]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller is not a recruiter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "listMyJobs",
    security(("BearerAuth" = []))
)]
#[get("/jobs/recruiter/my-jobs")]
pub async fn list_my_jobs(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Job>>> {
    let jobs = state.listing.list_for_recruiter(caller.id()).await?;
    Ok(web::Json(jobs))
}

/// Fetch one job.
///
/// Anonymous callers see published and closed jobs. Drafts resolve only for
/// their owner.
#[utoipa::path(
    get,
    path = "/api/jobs/{jobId}",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 200, description = "Job", body = JobSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid token", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "getJob",
    security((), ("BearerAuth" = []))
)]
#[get("/jobs/{job_id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    viewer: OptionalUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Job>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let job = state.listing.get_by_id(&job_id, viewer.0).await?;
    Ok(web::Json(job))
}

/// Publish a draft.
#[utoipa::path(
    patch,
    path = "/api/jobs/{jobId}/publish",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 200, description = "Job published", body = JobSchema),
        (status = 400, description = "Job is not a draft", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "publishJob",
    security(("BearerAuth" = []))
)]
#[patch("/jobs/{job_id}/publish")]
pub async fn publish_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Job>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let job = state.jobs.publish(&job_id, caller.id()).await?;
    Ok(web::Json(job))
}

/// Close a published job.
#[utoipa::path(
    patch,
    path = "/api/jobs/{jobId}/close",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 200, description = "Job closed", body = JobSchema),
        (status = 400, description = "Job is not published", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "closeJob",
    security(("BearerAuth" = []))
)]
#[patch("/jobs/{job_id}/close")]
pub async fn close_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Job>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let job = state.jobs.close(&job_id, caller.id()).await?;
    Ok(web::Json(job))
}

/// Delete a draft.
#[utoipa::path(
    delete,
    path = "/api/jobs/{jobId}",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 204, description = "Draft deleted"),
        (status = 400, description = "Job is not a draft", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller does not own the job", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob",
    security(("BearerAuth" = []))
)]
#[delete("/jobs/{job_id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    state.jobs.delete_draft(&job_id, caller.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
