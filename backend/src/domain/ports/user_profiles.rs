//! Driving port for identity-linked profiles.

use async_trait::async_trait;

use super::ResumeUpload;
use crate::domain::{Error, ProfileChanges, ProfileSync, UserId, UserProfile};

/// Result of syncing a profile from the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub profile: UserProfile,
    /// `true` when the profile did not exist before.
    pub created: bool,
}

/// Profile use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfiles: Send + Sync {
    /// Create or refresh the caller's profile.
    async fn sync(&self, caller: &UserId, sync: ProfileSync) -> Result<SyncOutcome, Error>;

    /// The caller's profile.
    async fn get_profile(&self, caller: &UserId) -> Result<UserProfile, Error>;

    /// Apply `changes` and optionally replace the resume.
    async fn update_profile(
        &self,
        caller: &UserId,
        changes: ProfileChanges,
        resume: Option<ResumeUpload>,
    ) -> Result<UserProfile, Error>;
}
