//! Seeker-facing application handlers.
//!
//! ```text
//! POST /api/applications/apply {"jobId":"...","coverLetter":"I am interested"}
//! GET /api/applications/status/{jobId}
//! GET /api/applications/my-applications
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::ApplyRequest;
use crate::domain::{ApplicationStatusView, SeekerApplication};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::jobs::JOB_ID;
use crate::inbound::http::payloads::ApplicationBody;
use crate::inbound::http::schemas::{
    ApplicationSchema, ApplicationStatusViewSchema, ErrorSchema, SeekerApplicationSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_job_id, require_text};

/// Apply to a published job.
///
/// A second application to the same job is rejected with
/// `duplicate_application` and `details.alreadyApplied = true`.
#[utoipa::path(
    post,
    path = "/api/applications/apply",
    request_body = ApplicationBody,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationSchema),
        (status = 400, description = "Invalid request, duplicate or job not open", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Caller cannot apply to this job", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "applyToJob",
    security(("BearerAuth" = []))
)]
#[post("/applications/apply")]
pub async fn apply(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<ApplicationBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let job_id = parse_job_id(&require_text(body.job_id, JOB_ID)?, JOB_ID)?;
    let request = ApplyRequest {
        cover_letter: body.cover_letter.unwrap_or_default(),
        expected_joining_date: body.expected_joining_date,
        expected_salary: body.expected_salary,
    };
    let application = state
        .applications
        .apply(&job_id, caller.id(), request)
        .await?;
    Ok(HttpResponse::Created().json(application))
}

/// Whether the caller applied to a job.
#[utoipa::path(
    get,
    path = "/api/applications/status/{jobId}",
    params(("jobId" = String, Path, description = "Job identifier", format = Uuid)),
    responses(
        (status = 200, description = "Application status", body = ApplicationStatusViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "applicationStatus",
    security(("BearerAuth" = []))
)]
#[get("/applications/status/{job_id}")]
pub async fn application_status(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApplicationStatusView>> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    let view = state.applications.check_status(&job_id, caller.id()).await?;
    Ok(web::Json(view))
}

/// The caller's applications, newest first.
#[utoipa::path(
    get,
    path = "/api/applications/my-applications",
    responses(
        (status = 200, description = "Applications", body = [SeekerApplicationSchema]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "myApplications",
    security(("BearerAuth" = []))
)]
#[get("/applications/my-applications")]
pub async fn my_applications(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<SeekerApplication>>> {
    let applications = state.applications.list_for_seeker(caller.id()).await?;
    Ok(web::Json(applications))
}
