//! User profile handlers.
//!
//! ```text
//! POST /api/users/sync {"email":"sam@example.com","name":"Sam"}
//! GET /api/users/profile
//! PUT /api/users/profile {"bio":"Backend developer"}
//! PUT /api/users/profile (multipart: profile=<json>, resume=<file>)
//! ```
//!
//! The profile key is always the verified token subject.

use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use utoipa::ToSchema;

use crate::domain::{ProfileChanges, ProfileSync, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::multipart::read_profile_update;
use crate::inbound::http::payloads::{ProfileBody, SyncBody};
use crate::inbound::http::schemas::{ErrorSchema, UserProfileSchema};
use crate::inbound::http::state::HttpState;

/// Multipart form accepted by `PUT /api/users/profile`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileUploadForm {
    /// Profile fields as a JSON document.
    #[schema(value_type = Option<ProfileBody>)]
    profile: Option<String>,
    /// PDF, DOC or DOCX resume.
    #[schema(value_type = Option<String>, format = Binary)]
    resume: Option<Vec<u8>>,
}

/// Create or refresh the caller's profile from the identity provider.
///
/// Returns 201 when the profile is created and 200 when it already existed.
/// Blank fields never overwrite stored values.
#[utoipa::path(
    post,
    path = "/api/users/sync",
    request_body = SyncBody,
    responses(
        (status = 201, description = "Profile created", body = UserProfileSchema),
        (status = 200, description = "Profile updated", body = UserProfileSchema),
        (status = 400, description = "Invalid request or email taken", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "syncUser",
    security(("BearerAuth" = []))
)]
#[post("/users/sync")]
pub async fn sync_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<SyncBody>,
) -> ApiResult<HttpResponse> {
    let sync = ProfileSync::try_from(payload.into_inner())?;
    let outcome = state.profiles.sync(caller.id(), sync).await?;
    let mut response = if outcome.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(outcome.profile))
}

/// The caller's profile.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile", body = UserProfileSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Profile not synced", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("BearerAuth" = []))
)]
#[get("/users/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.profiles.get_profile(caller.id()).await?;
    Ok(web::Json(profile))
}

/// Update the caller's profile, optionally replacing the resume.
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body(content(
        (ProfileBody = "application/json"),
        (ProfileUploadForm = "multipart/form-data")
    )),
    responses(
        (status = 200, description = "Profile updated", body = UserProfileSchema),
        (status = 400, description = "Invalid request or resume", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Profile not synced", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("BearerAuth" = []))
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    request: HttpRequest,
    payload: web::Payload,
) -> ApiResult<web::Json<UserProfile>> {
    let update = read_profile_update(&request, payload, state.resume_max_bytes).await?;
    let changes = ProfileChanges::try_from(update.profile)?;
    let profile = state
        .profiles
        .update_profile(caller.id(), changes, update.resume)
        .await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::SyncOutcome;
    use crate::domain::service_test_helpers::{seeker_id, seeker_profile};
    use crate::domain::{Error, ResumeRef, UserRole};
    use crate::inbound::http::test_utils::{TestPorts, bearer_for, detail_code, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    const BOUNDARY: &str = "profile-boundary";

    fn multipart_body() -> Vec<u8> {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"profile\"\r\n\r\n\
             {{\"bio\":\"Backend developer\"}}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.7\r\n\
             --{BOUNDARY}--\r\n"
        )
        .into_bytes()
    }

    #[rstest]
    #[case::created(true, StatusCode::CREATED)]
    #[case::refreshed(false, StatusCode::OK)]
    #[actix_web::test]
    async fn sync_reports_creation(#[case] created: bool, #[case] status: StatusCode) {
        let mut ports = TestPorts::default();
        ports
            .profiles
            .expect_sync()
            .withf(|caller, sync| {
                caller == &seeker_id()
                    && sync.email.as_ref() == "sam@example.com"
                    && sync.changes.role == Some(UserRole::JobSeeker)
            })
            .times(1)
            .returning(move |_, _| {
                Ok(SyncOutcome {
                    profile: seeker_profile(),
                    created,
                })
            });
        let app = actix_test::init_service(test_app(ports.into_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/users/sync")
            .insert_header(bearer_for("user_seeker"))
            .set_json(json!({ "email": "sam@example.com", "role": "job_seeker" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), status);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("id"), Some(&json!("user_seeker")));
    }

    #[rstest]
    #[actix_web::test]
    async fn sync_surfaces_email_conflicts() {
        let mut ports = TestPorts::default();
        ports.profiles.expect_sync().times(1).returning(|_, _| {
            Err(Error::invalid_request("email is already registered")
                .with_details(json!({ "field": "email", "code": "email_taken" })))
        });
        let app = actix_test::init_service(test_app(ports.into_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/users/sync")
            .insert_header(bearer_for("user_seeker"))
            .set_json(json!({ "email": "taken@example.com" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(detail_code(&body), Some("email_taken"));
    }

    #[rstest]
    #[actix_web::test]
    async fn json_update_carries_no_resume() {
        let mut ports = TestPorts::default();
        ports
            .profiles
            .expect_update_profile()
            .withf(|_, changes, resume| {
                changes.bio.as_deref() == Some("Backend developer") && resume.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(seeker_profile()));
        let app = actix_test::init_service(test_app(ports.into_state())).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/users/profile")
            .insert_header(bearer_for("user_seeker"))
            .set_json(json!({ "bio": "Backend developer" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn multipart_update_forwards_the_resume() {
        let mut ports = TestPorts::default();
        ports
            .profiles
            .expect_update_profile()
            .withf(|_, changes, resume| {
                changes.bio.as_deref() == Some("Backend developer")
                    && resume
                        .as_ref()
                        .is_some_and(|file| file.file_name() == "cv.pdf")
            })
            .times(1)
            .returning(|_, _, _| {
                let mut profile = seeker_profile();
                profile.resume = Some(ResumeRef {
                    public_id: "trustyhire/resumes/user_seeker-cv".to_owned(),
                    url: "https://files.example.com/cv.pdf".to_owned(),
                });
                Ok(profile)
            });
        let app = actix_test::init_service(test_app(ports.into_state())).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/users/profile")
            .insert_header(bearer_for("user_seeker"))
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("resume").and_then(|resume| resume.get("url")),
            Some(&json!("https://files.example.com/cv.pdf"))
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_uploads_are_rejected_before_the_service() {
        let state = TestPorts::default().into_state().with_resume_max_bytes(4);
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/users/profile")
            .insert_header(bearer_for("user_seeker"))
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(detail_code(&body), Some("file_too_large"));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_profile_is_not_found() {
        let mut ports = TestPorts::default();
        ports
            .profiles
            .expect_get_profile()
            .times(1)
            .returning(|_| Err(Error::not_found("profile not found")));
        let app = actix_test::init_service(test_app(ports.into_state())).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/users/profile")
            .insert_header(bearer_for("user_seeker"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
