//! Tests for the domain user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn profile(now: DateTime<Utc>) -> UserProfile {
    let mut profile = UserProfile::new(
        UserId::new("user_seeker").expect("valid id"),
        EmailAddress::new("seeker@example.com").expect("valid email"),
        now,
    );
    profile.name = Some("Sam Seeker".to_owned());
    profile.bio = Some("Rustacean".to_owned());
    profile
}

#[rstest]
#[case("user_2abcDEF")]
#[case("auth0|5f7c8ec7c33c6c004bbafe82")]
#[case("google-oauth2:1234")]
fn user_id_accepts_provider_subjects(#[case] raw: &str) {
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(id.as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("   ", UserValidationError::EmptyId)]
#[case("has space", UserValidationError::InvalidId { max: USER_ID_MAX })]
#[case("emoji😀", UserValidationError::InvalidId { max: USER_ID_MAX })]
fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_rejects_overlong_input() {
    let raw = "a".repeat(USER_ID_MAX + 1);
    assert!(UserId::new(raw).is_err());
}

#[rstest]
fn email_is_trimmed_and_lowercased() {
    let email = EmailAddress::new("  Ada@Example.COM ").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
#[case("no-at-sign")]
#[case("a@b")]
#[case("two words@example.com")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::InvalidEmail));
}

#[rstest]
fn role_round_trips_through_storage_names() {
    for role in [UserRole::JobSeeker, UserRole::Recruiter] {
        assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
    }
    assert!("admin".parse::<UserRole>().is_err());
}

#[rstest]
fn experience_serialises_type_field(profile: UserProfile) {
    let mut profile = profile;
    profile.experience.push(Experience {
        company: "Acme".to_owned(),
        position: "Engineer".to_owned(),
        employment_type: Some("Full-time".to_owned()),
        is_current: true,
        ..Experience::default()
    });
    let value = serde_json::to_value(&profile).expect("serialise profile");
    assert_eq!(
        value.pointer("/experience/0/type"),
        Some(&json!("Full-time"))
    );
    assert_eq!(value.pointer("/role"), Some(&json!("job_seeker")));
}

#[rstest]
fn display_name_falls_back_to_email(profile: UserProfile) {
    let mut profile = profile;
    assert_eq!(profile.display_name(), "Sam Seeker");
    profile.name = None;
    assert_eq!(profile.display_name(), "seeker@example.com");
}

#[rstest]
fn blank_changes_do_not_overwrite(profile: UserProfile, now: DateTime<Utc>) {
    let mut profile = profile;
    let changes = ProfileChanges {
        name: Some("   ".to_owned()),
        phone: Some(" 555-0100 ".to_owned()),
        skills: Some(vec!["rust".to_owned(), " ".to_owned()]),
        ..ProfileChanges::default()
    }
    .without_blanks();

    let later = now + chrono::Duration::minutes(5);
    changes.apply_to(&mut profile, later);

    assert_eq!(profile.name.as_deref(), Some("Sam Seeker"));
    assert_eq!(profile.phone.as_deref(), Some("555-0100"));
    assert_eq!(profile.skills, vec!["rust".to_owned()]);
    assert_eq!(profile.bio.as_deref(), Some("Rustacean"));
    assert_eq!(profile.updated_at, later);
}

#[rstest]
fn changes_replace_role_and_resume(profile: UserProfile, now: DateTime<Utc>) {
    let mut profile = profile;
    let resume = ResumeRef {
        public_id: "trustyhire/resumes/abc".to_owned(),
        url: "https://cdn.example.com/abc.pdf".to_owned(),
    };
    ProfileChanges {
        role: Some(UserRole::Recruiter),
        resume: Some(resume.clone()),
        ..ProfileChanges::default()
    }
    .apply_to(&mut profile, now);

    assert_eq!(profile.role, UserRole::Recruiter);
    assert_eq!(profile.resume, Some(resume));
}
