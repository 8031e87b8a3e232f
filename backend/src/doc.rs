//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health probes and the
//! schema mirrors from [`crate::inbound::http::schemas`]. Domain types stay
//! free of utoipa derives; the mirrors carry the documentation instead.
//!
//! Swagger UI serves the generated document at `/docs` in debug builds.

use crate::inbound::http::payloads::{
    ApplicationBody, JobBody, ProfileBody, SalaryBody, SaveJobBody, StatusBody, SyncBody, TextList,
};
use crate::inbound::http::schemas::{
    ApplicantDetailSchema, ApplicantSnapshotSchema, ApplicantStatsSchema, ApplicationSchema,
    ApplicationStatusViewSchema, ErrorCodeSchema, ErrorSchema, JobApplicantSchema,
    JobApplicantsSchema, JobSchema, JobSnapshotSchema, JobSummarySchema, ResumeRefSchema,
    SalarySchema, SavedJobEntrySchema, SavedJobSchema, SavedJobStatusSchema,
    SeekerApplicationSchema, UserProfileSchema,
};
use crate::inbound::http::users::ProfileUploadForm;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by handler annotations.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Session token issued by the identity provider; its subject is the user id.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TrustyHire API",
        description = "Job postings, applications, bookmarks and profiles.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::search_jobs,
        crate::inbound::http::jobs::list_my_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::publish_job,
        crate::inbound::http::jobs::close_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::applicants::list_applicants,
        crate::inbound::http::applicants::applicant_stats,
        crate::inbound::http::applicants::get_applicant,
        crate::inbound::http::applicants::get_applicant_resume,
        crate::inbound::http::applicants::update_applicant_status,
        crate::inbound::http::applications::apply,
        crate::inbound::http::applications::application_status,
        crate::inbound::http::applications::my_applications,
        crate::inbound::http::saved_jobs::save_job,
        crate::inbound::http::saved_jobs::list_saved_jobs,
        crate::inbound::http::saved_jobs::saved_job_ids,
        crate::inbound::http::saved_jobs::check_saved_job,
        crate::inbound::http::saved_jobs::unsave_job,
        crate::inbound::http::users::sync_user,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SalarySchema,
        JobSchema,
        JobSummarySchema,
        JobSnapshotSchema,
        ApplicationSchema,
        ApplicationStatusViewSchema,
        SeekerApplicationSchema,
        ResumeRefSchema,
        ApplicantSnapshotSchema,
        JobApplicantSchema,
        JobApplicantsSchema,
        ApplicantStatsSchema,
        ApplicantDetailSchema,
        UserProfileSchema,
        SavedJobSchema,
        SavedJobEntrySchema,
        SavedJobStatusSchema,
        JobBody,
        SalaryBody,
        TextList,
        ApplicationBody,
        StatusBody,
        SaveJobBody,
        SyncBody,
        ProfileBody,
        ProfileUploadForm,
    )),
    tags(
        (name = "jobs", description = "Job postings and their lifecycle"),
        (name = "applicants", description = "Recruiter triage of applications"),
        (name = "applications", description = "Seeker applications"),
        (name = "saved-jobs", description = "Seeker bookmarks"),
        (name = "users", description = "Profiles and identity sync"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const JOB_SCHEMA_NAME: &str = "crate.domain.Job";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn job_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let job_schema = schemas.get(JOB_SCHEMA_NAME).expect("Job schema");

        assert_object_schema_has_field(job_schema, "recruiterId");
        assert_object_schema_has_field(job_schema, "publishedAt");
        assert_object_schema_has_field(job_schema, "views");
    }

    #[rstest]
    #[case("/api/jobs")]
    #[case("/api/jobs/{jobId}")]
    #[case("/api/jobs/{jobId}/applicants/{applicantId}/resume")]
    #[case("/api/applications/apply")]
    #[case("/api/saved-jobs/ids")]
    #[case("/api/users/profile")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
