//! Shared fixtures for the domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{MockNotifier, MockUserRepository, Notifier};
use crate::domain::{
    Application, ApplicationDraft, ApplicationId, CoverLetter, EmailAddress, Job, JobFields,
    JobId, JobTransition, JobType, UserId, UserProfile, UserRole,
};

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock(pub(crate) DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock(fixed_now()))
}

pub(crate) fn recruiter_id() -> UserId {
    UserId::new("user_recruiter").expect("valid id")
}

pub(crate) fn seeker_id() -> UserId {
    UserId::new("user_seeker").expect("valid id")
}

pub(crate) fn stranger_id() -> UserId {
    UserId::new("user_stranger").expect("valid id")
}

pub(crate) fn profile(id: UserId, role: UserRole, email: &str) -> UserProfile {
    let mut profile = UserProfile::new(
        id,
        EmailAddress::new(email).expect("valid email"),
        fixed_now(),
    );
    profile.role = role;
    profile
}

pub(crate) fn recruiter_profile() -> UserProfile {
    let mut profile = profile(recruiter_id(), UserRole::Recruiter, "rita@acme.io");
    profile.name = Some("Rita Recruiter".to_owned());
    profile.company_name = Some("Acme".to_owned());
    profile
}

pub(crate) fn seeker_profile() -> UserProfile {
    let mut profile = profile(seeker_id(), UserRole::JobSeeker, "sam@example.com");
    profile.name = Some("Sam Seeker".to_owned());
    profile
}

/// User repository answering lookups from a fixed set of profiles.
pub(crate) fn users_from(profiles: Vec<UserProfile>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(profiles.iter().find(|profile| &profile.id == id).cloned()));
    users
}

/// The recruiter and seeker fixtures, with their current roles.
pub(crate) fn known_users() -> MockUserRepository {
    users_from(vec![recruiter_profile(), seeker_profile()])
}

pub(crate) fn job_fields() -> JobFields {
    JobFields {
        title: Some("Backend Engineer".to_owned()),
        description: Some("Build hiring APIs".to_owned()),
        category: Some("Engineering".to_owned()),
        job_type: Some(JobType::FullTime),
        location: Some("Remote".to_owned()),
        company_name: Some("Acme".to_owned()),
        ..JobFields::default()
    }
}

pub(crate) fn draft_job() -> Job {
    Job::draft(
        JobId::random(),
        recruiter_id(),
        EmailAddress::new("rita@acme.io").expect("valid email"),
        job_fields(),
        fixed_now(),
    )
    .expect("valid draft")
}

pub(crate) fn published_job() -> Job {
    let mut job = draft_job();
    job.transition(JobTransition::Publish, fixed_now());
    job
}

pub(crate) fn closed_job() -> Job {
    let mut job = published_job();
    job.transition(JobTransition::Close, fixed_now());
    job
}

pub(crate) fn pending_application(job: &Job) -> Application {
    Application::submit(
        ApplicationId::random(),
        job.id,
        seeker_id(),
        ApplicationDraft {
            cover_letter: CoverLetter::new("I am interested").expect("valid letter"),
            expected_joining_date: None,
            expected_salary: None,
        },
        fixed_now(),
    )
}

/// Notifier mock that accepts any number of notifications.
pub(crate) fn quiet_notifier() -> Arc<dyn Notifier> {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().returning(|_| Ok(()));
    Arc::new(notifier)
}
