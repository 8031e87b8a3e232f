//! Tests for request body normalisation.

use super::*;
use crate::domain::ErrorCode;
use rstest::rstest;
use serde_json::json;

fn job_body(value: serde_json::Value) -> JobBody {
    serde_json::from_value(value).expect("job body deserialises")
}

#[rstest]
fn job_body_accepts_structured_salary_and_lists() {
    let fields = JobFields::try_from(job_body(json!({
        "title": "Backend Engineer",
        "jobType": "Full-time",
        "responsibilities": ["Ship", "Review"],
        "requirements": "Rust\nSQL",
        "salary": { "min": 50000, "max": 70000, "currency": "eur" },
        "seniorityLevel": "Expert"
    })))
    .expect("valid body");

    assert_eq!(fields.job_type, Some(JobType::FullTime));
    assert_eq!(fields.responsibilities, vec!["Ship".to_owned(), "Review".to_owned()]);
    assert_eq!(fields.requirements, vec!["Rust".to_owned(), "SQL".to_owned()]);
    assert_eq!(fields.seniority_level, Some(SeniorityLevel::Expert));
    let salary = fields.salary.expect("salary present");
    assert_eq!((salary.min, salary.max), (Some(50_000), Some(70_000)));
    assert_eq!(salary.currency, "EUR");
}

#[rstest]
#[case::range("50000-70000 USD", Some(50_000), Some(70_000), false)]
#[case::shorthand("$60k", Some(60_000), Some(60_000), false)]
#[case::negotiable("Negotiable", None, None, true)]
fn job_body_normalises_salary_text(
    #[case] text: &str,
    #[case] min: Option<u32>,
    #[case] max: Option<u32>,
    #[case] negotiable: bool,
) {
    let fields = JobFields::try_from(job_body(json!({ "salary": text }))).expect("valid");
    let salary = fields.salary.expect("salary present");
    assert_eq!(salary.min, min);
    assert_eq!(salary.max, max);
    assert_eq!(salary.negotiable, negotiable);
    assert_eq!(salary.currency, "USD");
}

#[rstest]
fn blank_salary_text_means_no_salary() {
    let fields = JobFields::try_from(job_body(json!({ "salary": "  " }))).expect("valid");
    assert!(fields.salary.is_none());
}

#[rstest]
fn inverted_salary_range_is_rejected() {
    let err = JobFields::try_from(job_body(json!({ "salary": { "min": 9, "max": 1 } })))
        .expect_err("inverted range");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "salary", "code": "invalid_salary" }))
    );
}

#[rstest]
fn unknown_job_type_is_rejected() {
    let err = JobFields::try_from(job_body(json!({ "jobType": "Gig" }))).expect_err("bad type");
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "jobType", "code": "invalid_job_type" }))
    );
}

#[rstest]
fn search_query_parses_job_type() {
    let filters = JobSearchFilters::try_from(JobSearchQuery {
        job_type: Some("Part-time".to_owned()),
        ..JobSearchQuery::default()
    })
    .expect("valid query");
    assert_eq!(filters.job_type, Some(JobType::PartTime));

    let err = JobSearchFilters::try_from(JobSearchQuery {
        job_type: Some("whenever".to_owned()),
        ..JobSearchQuery::default()
    })
    .expect_err("bad type");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(Some("Accepted"), Ok(ApplicationStatus::Accepted))]
#[case(Some(" Rejected "), Ok(ApplicationStatus::Rejected))]
#[case(Some("accepted"), Err("invalid_value"))]
#[case(None, Err("missing_field"))]
fn status_body_requires_known_status(
    #[case] raw: Option<&str>,
    #[case] expected: Result<ApplicationStatus, &str>,
) {
    let result = StatusBody {
        status: raw.map(str::to_owned),
    }
    .decision();
    match expected {
        Ok(status) => assert_eq!(result.expect("valid status"), status),
        Err(code) => {
            let err = result.expect_err("invalid status");
            let detail = err
                .details()
                .and_then(|details| details.get("code"))
                .and_then(serde_json::Value::as_str);
            assert_eq!(detail, Some(code));
        }
    }
}

#[rstest]
fn sync_body_requires_valid_email() {
    let missing = ProfileSync::try_from(SyncBody::default()).expect_err("missing email");
    assert_eq!(
        missing.details(),
        Some(&json!({ "field": "email", "code": "missing_field" }))
    );

    let body: SyncBody = serde_json::from_value(json!({
        "email": "Sam@Example.com",
        "name": "Sam",
        "role": "recruiter",
        "companyName": "Acme"
    }))
    .expect("sync body deserialises");
    let sync = ProfileSync::try_from(body).expect("valid sync");
    assert_eq!(sync.email.as_ref(), "sam@example.com");
    assert_eq!(sync.changes.role, Some(UserRole::Recruiter));
    assert_eq!(sync.changes.company_name.as_deref(), Some("Acme"));
}

#[rstest]
fn profile_body_rejects_unknown_role() {
    let err = ProfileChanges::try_from(ProfileBody {
        role: Some("admin".to_owned()),
        ..ProfileBody::default()
    })
    .expect_err("unknown role");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
