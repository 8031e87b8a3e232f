//! Saved job (bookmark) handlers.
//!
//! ```text
//! POST /api/saved-jobs {"jobId":"..."}
//! GET /api/saved-jobs
//! GET /api/saved-jobs/ids
//! GET /api/saved-jobs/check/{jobId}
//! DELETE /api/saved-jobs/{jobId}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{JobId, SavedJobEntry, SavedJobStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::jobs::JOB_ID;
use crate::inbound::http::payloads::SaveJobBody;
use crate::inbound::http::schemas::{
    ErrorSchema, SavedJobEntrySchema, SavedJobSchema, SavedJobStatusSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_job_id, require_text};

/// Bookmark a job.
#[utoipa::path(
    post,
    path = "/api/saved-jobs",
    request_body = SaveJobBody,
    responses(
        (status = 201, description = "Job saved", body = SavedJobSchema),
        (status = 400, description = "Invalid request or already saved", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller is not a job seeker", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["saved-jobs"],
    operation_id = "saveJob",
    security(("BearerAuth" = []))
)]
#[post("/saved-jobs")]
pub async fn save_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<SaveJobBody>,
) -> ApiResult<HttpResponse> {
    let job_id = parse_job_id(&require_text(payload.into_inner().job_id, JOB_ID)?, JOB_ID)?;
    let saved = state.saved_jobs.save(caller.id(), &job_id).await?;
    Ok(HttpResponse::Created().json(saved))
}

/// The caller's bookmarks joined with the live jobs, newest first.
#[utoipa::path(
    get,
    path = "/api/saved-jobs",
    responses(
        (status = 200, description = "Saved jobs", body = [SavedJobEntrySchema]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["saved-jobs"],
    operation_id = "listSavedJobs",
    security(("BearerAuth" = []))
)]
#[get("/saved-jobs")]
pub async fn list_saved_jobs(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<SavedJobEntry>>> {
    let entries = state.saved_jobs.list(caller.id()).await?;
    Ok(web::Json(entries))
}

/// Identifiers of every bookmarked job, for bulk checks.
#[utoipa::path(
    get,
    path = "/api/saved-jobs/ids",
    responses(
        (status = 200, description = "Saved job identifiers", body = [String]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["saved-jobs"],
    operation_id = "savedJobIds",
    security(("BearerAuth" = []))
)]
#[get("/saved-jobs/ids")]
pub async fn saved_job_ids(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<JobId>>> {
    let ids = state.saved_jobs.saved_job_ids(caller.id()).await?;
    Ok(web::Json(ids))
}

/// Whether a job is bookmarked.
#[utoipa::path(
    get,
    path = "/api/saved-jobs/check/{jobId}",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 200, description = "Bookmark state", body = SavedJobStatusSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["saved-jobs"],
    operation_id = "checkSavedJob",
    security(("BearerAuth" = []))
)]
#[get("/saved-jobs/check/{job_id}")]
pub async fn check_saved_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SavedJobStatus>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let status = state.saved_jobs.is_saved(caller.id(), &job_id).await?;
    Ok(web::Json(status))
}

/// Remove a bookmark.
#[utoipa::path(
    delete,
    path = "/api/saved-jobs/{jobId}",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 204, description = "Bookmark removed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Job was not saved", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["saved-jobs"],
    operation_id = "unsaveJob",
    security(("BearerAuth" = []))
)]
#[delete("/saved-jobs/{job_id}")]
pub async fn unsave_job(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    state.saved_jobs.unsave(caller.id(), &job_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
