//! Tests for application intake and applicant views.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::{ErrorCode, UserRole};
use crate::domain::ports::{
    ApplicationRepositoryError, MockApplicationRepository, MockJobRepository, MockNotifier,
    MockUserRepository,
};
use crate::domain::service_test_helpers::{
    clock, closed_job, draft_job, fixed_now, known_users, pending_application, published_job,
    quiet_notifier, recruiter_id, recruiter_profile, seeker_id, seeker_profile, stranger_id,
    users_from,
};

type Service =
    ApplicationService<MockJobRepository, MockApplicationRepository, MockUserRepository>;

fn service(
    jobs: MockJobRepository,
    applications: MockApplicationRepository,
    users: MockUserRepository,
) -> Service {
    ApplicationService::new(
        Arc::new(jobs),
        Arc::new(applications),
        Arc::new(users),
        quiet_notifier(),
        clock(),
    )
}

fn jobs_returning(job: Job) -> MockJobRepository {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));
    jobs
}

fn users_returning(profile: UserProfile) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(profile.clone())));
    users
}

fn request(cover_letter: &str) -> ApplyRequest {
    ApplyRequest {
        cover_letter: cover_letter.to_owned(),
        expected_joining_date: None,
        expected_salary: Some("90k".to_owned()),
    }
}

#[tokio::test]
async fn apply_creates_pending_application_and_notifies_recruiter() {
    let job = published_job();
    let job_id = job.id;
    let mut applications = MockApplicationRepository::new();
    applications.expect_insert().times(1).return_once(|_| Ok(()));
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|notification| {
            matches!(
                notification,
                Notification::ApplicationReceived { applicant_name, .. }
                    if applicant_name == "Sam Seeker"
            ) && notification.recipient().as_ref() == "rita@acme.io"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let service = ApplicationService::new(
        Arc::new(jobs_returning(job)),
        Arc::new(applications),
        Arc::new(users_returning(seeker_profile())),
        Arc::new(notifier),
        clock(),
    );

    let application = service
        .apply(&job_id, &seeker_id(), request("  Keen to join  "))
        .await
        .expect("application accepted");

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.job_id, job_id);
    assert_eq!(application.seeker_id, seeker_id());
    assert_eq!(application.cover_letter.as_ref(), "Keen to join");
    assert_eq!(application.applied_at, fixed_now());
    assert!(application.decided_at.is_none());
}

#[rstest]
#[case::empty("")]
#[case::blank("  \n ")]
#[tokio::test]
async fn apply_requires_a_cover_letter(#[case] letter: &str) {
    let mut applications = MockApplicationRepository::new();
    applications.expect_insert().times(0);
    let service = service(
        MockJobRepository::new(),
        applications,
        MockUserRepository::new(),
    );

    let err = service
        .apply(&JobId::random(), &seeker_id(), request(letter))
        .await
        .expect_err("cover letter required");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "coverLetter", "code": "missing_field" }))
    );
}

#[rstest]
#[case::draft(draft_job())]
#[case::closed(closed_job())]
#[tokio::test]
async fn apply_to_unpublished_job_is_an_invalid_transition(#[case] job: Job) {
    let mut applications = MockApplicationRepository::new();
    applications.expect_insert().times(0);
    let service = service(
        jobs_returning(job),
        applications,
        users_returning(seeker_profile()),
    );

    let err = service
        .apply(&JobId::random(), &seeker_id(), request("Hello"))
        .await
        .expect_err("not open");

    assert_eq!(err.code(), ErrorCode::InvalidTransition);
}

#[tokio::test]
async fn apply_to_missing_job_is_not_found() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(|_| Ok(None));
    let service = service(
        jobs,
        MockApplicationRepository::new(),
        users_returning(seeker_profile()),
    );

    let err = service
        .apply(&JobId::random(), &seeker_id(), request("Hello"))
        .await
        .expect_err("missing job");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn recruiters_cannot_apply() {
    let service = service(
        jobs_returning(published_job()),
        MockApplicationRepository::new(),
        users_returning(recruiter_profile()),
    );

    let err = service
        .apply(&JobId::random(), &recruiter_id(), request("Hello"))
        .await
        .expect_err("recruiter");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn seekers_cannot_apply_to_their_own_postings() {
    let mut job = published_job();
    job.recruiter_id = seeker_id();
    let service = service(
        jobs_returning(job),
        MockApplicationRepository::new(),
        users_returning(seeker_profile()),
    );

    let err = service
        .apply(&JobId::random(), &seeker_id(), request("Hello"))
        .await
        .expect_err("own job");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn second_application_is_a_duplicate() {
    let mut applications = MockApplicationRepository::new();
    applications
        .expect_insert()
        .return_once(|_| Err(ApplicationRepositoryError::duplicate()));
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().times(0);
    let service = ApplicationService::new(
        Arc::new(jobs_returning(published_job())),
        Arc::new(applications),
        Arc::new(users_returning(seeker_profile())),
        Arc::new(notifier),
        clock(),
    );

    let err = service
        .apply(&JobId::random(), &seeker_id(), request("Hello again"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::DuplicateApplication);
    assert_eq!(err.details(), Some(&json!({ "alreadyApplied": true })));
}

#[tokio::test]
async fn check_status_reports_absence_and_presence() {
    let application = pending_application(&published_job());
    let expected_id = application.id;
    let mut applications = MockApplicationRepository::new();
    let mut seq = mockall::Sequence::new();
    applications
        .expect_find_for_seeker()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(None));
    applications
        .expect_find_for_seeker()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_, _| Ok(Some(application)));
    let service = service(
        MockJobRepository::new(),
        applications,
        MockUserRepository::new(),
    );
    let job_id = JobId::random();

    let before = service
        .check_status(&job_id, &seeker_id())
        .await
        .expect("status");
    assert_eq!(before, ApplicationStatusView::not_applied());

    let after = service
        .check_status(&job_id, &seeker_id())
        .await
        .expect("status");
    assert!(after.has_applied);
    assert_eq!(after.application_id, Some(expected_id));
    assert_eq!(after.status, Some(ApplicationStatus::Pending));
}

#[tokio::test]
async fn seeker_listing_tolerates_deleted_jobs() {
    let live = published_job();
    let live_application = pending_application(&live);
    let orphan = pending_application(&draft_job());
    let listed = vec![live_application.clone(), orphan.clone()];
    let mut applications = MockApplicationRepository::new();
    applications
        .expect_list_for_seeker()
        .return_once(move |_| Ok(listed));
    let mut jobs = MockJobRepository::new();
    let found = live.clone();
    jobs.expect_find_many()
        .withf(|ids| ids.len() == 2)
        .return_once(move |_| Ok(vec![found]));
    let service = service(jobs, applications, MockUserRepository::new());

    let entries = service
        .list_for_seeker(&seeker_id())
        .await
        .expect("listing");

    assert_eq!(entries.len(), 2);
    let first = entries.first().expect("first entry");
    assert_eq!(first.application, live_application);
    assert_eq!(first.job.as_ref().map(|job| job.id), Some(live.id));
    let second = entries.get(1).expect("second entry");
    assert_eq!(second.application.id, orphan.id);
    assert!(second.job.is_none());
}

#[tokio::test]
async fn recruiter_sees_applicants_with_contact_details() {
    let job = published_job();
    let application = pending_application(&job);
    let listed = vec![application.clone()];
    let mut applications = MockApplicationRepository::new();
    applications
        .expect_list_for_job()
        .withf(|_, status| *status == Some(ApplicationStatus::Pending))
        .return_once(move |_, _| Ok(listed));
    let mut users = known_users();
    users
        .expect_find_many()
        .return_once(|_| Ok(vec![seeker_profile()]));
    let service = service(jobs_returning(job.clone()), applications, users);

    let listing = service
        .list_for_job(&job.id, &recruiter_id(), Some(ApplicationStatus::Pending))
        .await
        .expect("applicants");

    assert_eq!(listing.job, job.summary());
    assert_eq!(listing.total_applicants, 1);
    let applicant = listing
        .applicants
        .first()
        .and_then(|entry| entry.applicant.as_ref())
        .expect("applicant snapshot");
    assert_eq!(applicant.name, "Sam Seeker");
    assert_eq!(applicant.email.as_ref(), "sam@example.com");
}

#[tokio::test]
async fn applicant_views_are_owner_only() {
    let mut applications = MockApplicationRepository::new();
    applications.expect_list_for_job().times(0);
    applications.expect_count_by_status().times(0);
    applications.expect_find_in_job().times(0);
    let service = service(
        jobs_returning(published_job()),
        applications,
        MockUserRepository::new(),
    );
    let job_id = JobId::random();

    let listing = service
        .list_for_job(&job_id, &stranger_id(), None)
        .await
        .expect_err("not owner");
    let stats = service
        .stats_for_job(&job_id, &stranger_id())
        .await
        .expect_err("not owner");
    let detail = service
        .get_for_job(&job_id, &ApplicationId::random(), &stranger_id())
        .await
        .expect_err("not owner");

    for err in [listing, stats, detail] {
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}

#[tokio::test]
async fn applicant_detail_includes_full_profile() {
    let job = published_job();
    let application = pending_application(&job);
    let found = application.clone();
    let mut applications = MockApplicationRepository::new();
    applications
        .expect_find_in_job()
        .return_once(move |_, _| Ok(Some(found)));
    let service = service(jobs_returning(job.clone()), applications, known_users());

    let detail = service
        .get_for_job(&job.id, &application.id, &recruiter_id())
        .await
        .expect("detail");

    assert_eq!(detail.application, application);
    assert_eq!(detail.applicant, Some(seeker_profile()));
}

#[tokio::test]
async fn applicant_detail_for_unknown_application_is_not_found() {
    let mut applications = MockApplicationRepository::new();
    applications
        .expect_find_in_job()
        .return_once(|_, _| Ok(None));
    let service = service(
        jobs_returning(published_job()),
        applications,
        known_users(),
    );

    let err = service
        .get_for_job(&JobId::random(), &ApplicationId::random(), &recruiter_id())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn stats_come_from_the_repository() {
    let mut applications = MockApplicationRepository::new();
    applications.expect_count_by_status().return_once(|_| {
        let mut stats = ApplicantStats::default();
        stats.record(ApplicationStatus::Pending, 2);
        stats.record(ApplicationStatus::Accepted, 1);
        Ok(stats)
    });
    let service = service(
        jobs_returning(closed_job()),
        applications,
        known_users(),
    );

    let stats = service
        .stats_for_job(&JobId::random(), &recruiter_id())
        .await
        .expect("stats");

    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.rejected, 0);
}

#[tokio::test]
async fn applicant_views_require_the_recruiter_role() {
    let mut former = recruiter_profile();
    former.role = UserRole::JobSeeker;
    let mut applications = MockApplicationRepository::new();
    applications.expect_list_for_job().times(0);
    applications.expect_count_by_status().times(0);
    applications.expect_find_in_job().times(0);
    let service = service(
        jobs_returning(published_job()),
        applications,
        users_from(vec![former]),
    );
    let job_id = JobId::random();

    let listing = service
        .list_for_job(&job_id, &recruiter_id(), None)
        .await
        .expect_err("no longer a recruiter");
    let stats = service
        .stats_for_job(&job_id, &recruiter_id())
        .await
        .expect_err("no longer a recruiter");
    let detail = service
        .get_for_job(&job_id, &ApplicationId::random(), &recruiter_id())
        .await
        .expect_err("no longer a recruiter");

    for err in [listing, stats, detail] {
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
