//! Role checks shared by the services.

use crate::domain::{Error, UserProfile, UserRole};

/// Ensure `profile` exists and acts in `role`.
///
/// A missing profile means the caller never synced with the identity
/// provider.
pub(crate) fn require_role(
    profile: Option<UserProfile>,
    role: UserRole,
) -> Result<UserProfile, Error> {
    let profile = profile.ok_or_else(|| Error::forbidden("profile not synced"))?;
    if profile.role != role {
        return Err(Error::forbidden(format!("only a {role} may perform this action")));
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EmailAddress, ErrorCode, UserId};
    use chrono::Utc;
    use rstest::rstest;

    fn profile(role: UserRole) -> UserProfile {
        let mut profile = UserProfile::new(
            UserId::new("user_a").expect("valid id"),
            EmailAddress::new("a@example.com").expect("valid email"),
            Utc::now(),
        );
        profile.role = role;
        profile
    }

    #[rstest]
    fn missing_profile_is_forbidden() {
        let err = require_role(None, UserRole::Recruiter).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "profile not synced");
    }

    #[rstest]
    #[case(UserRole::JobSeeker, UserRole::Recruiter)]
    #[case(UserRole::Recruiter, UserRole::JobSeeker)]
    fn wrong_role_is_forbidden(#[case] actual: UserRole, #[case] required: UserRole) {
        let err = require_role(Some(profile(actual)), required).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn matching_role_passes_profile_through() {
        let found = require_role(Some(profile(UserRole::Recruiter)), UserRole::Recruiter)
            .expect("allowed");
        assert_eq!(found.role, UserRole::Recruiter);
    }
}
