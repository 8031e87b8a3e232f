//! Identity-linked profiles and resume uploads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ResumeStorage, ResumeStorageError, ResumeUpload, SyncOutcome, UserProfiles, UserRepository,
    UserRepositoryError,
};
use crate::domain::service_support::{invalid_field, map_user_repository_error};
use crate::domain::{Error, ProfileChanges, ProfileSync, UserId, UserProfile};

/// Service implementing [`UserProfiles`].
#[derive(Clone)]
pub struct UserProfileService<U> {
    users: Arc<U>,
    resumes: Arc<dyn ResumeStorage>,
    clock: Arc<dyn Clock>,
}

impl<U> UserProfileService<U> {
    /// Create a profile service.
    pub fn new(users: Arc<U>, resumes: Arc<dyn ResumeStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            resumes,
            clock,
        }
    }
}

fn map_storage_error(error: ResumeStorageError) -> Error {
    match error {
        ResumeStorageError::Disabled => Error::unavailable("resume storage is not configured"),
        ResumeStorageError::Connection { message } => {
            Error::unavailable(format!("resume storage unavailable: {message}"))
        }
        ResumeStorageError::Rejected { message } => invalid_field(
            "resume",
            "upload_rejected",
            format!("resume upload rejected: {message}"),
        ),
    }
}

impl<U> UserProfileService<U>
where
    U: UserRepository,
{
    async fn find(&self, caller: &UserId) -> Result<Option<UserProfile>, Error> {
        self.users
            .find_by_id(caller)
            .await
            .map_err(map_user_repository_error)
    }

    async fn apply_changes(
        &self,
        mut profile: UserProfile,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error> {
        changes.apply_to(&mut profile, self.clock.utc());
        self.users
            .update(&profile)
            .await
            .map_err(map_user_repository_error)?;
        Ok(profile)
    }
}

#[async_trait]
impl<U> UserProfiles for UserProfileService<U>
where
    U: UserRepository,
{
    async fn sync(&self, caller: &UserId, sync: ProfileSync) -> Result<SyncOutcome, Error> {
        let ProfileSync { email, changes } = sync;
        let mut changes = changes.without_blanks();
        changes.email = Some(email.clone());

        if let Some(existing) = self.find(caller).await? {
            let profile = self.apply_changes(existing, changes).await?;
            debug!(user = %caller, "profile refreshed");
            return Ok(SyncOutcome {
                profile,
                created: false,
            });
        }

        let now = self.clock.utc();
        let mut profile = UserProfile::new(caller.clone(), email, now);
        changes.clone().apply_to(&mut profile, now);
        match self.users.insert(&profile).await {
            Ok(()) => {
                info!(user = %caller, role = %profile.role, "profile created");
                Ok(SyncOutcome {
                    profile,
                    created: true,
                })
            }
            Err(UserRepositoryError::AlreadyExists) => {
                // A concurrent sync created the row first; fall back to an update.
                let existing = self
                    .find(caller)
                    .await?
                    .ok_or_else(|| Error::internal("profile vanished during sync"))?;
                let profile = self.apply_changes(existing, changes).await?;
                Ok(SyncOutcome {
                    profile,
                    created: false,
                })
            }
            Err(error) => Err(map_user_repository_error(error)),
        }
    }

    async fn get_profile(&self, caller: &UserId) -> Result<UserProfile, Error> {
        self.find(caller)
            .await?
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    async fn update_profile(
        &self,
        caller: &UserId,
        changes: ProfileChanges,
        resume: Option<ResumeUpload>,
    ) -> Result<UserProfile, Error> {
        let profile = self.get_profile(caller).await?;
        let mut changes = changes.without_blanks();
        if let Some(file) = resume {
            let stored = self
                .resumes
                .upload(caller, file)
                .await
                .map_err(map_storage_error)?;
            info!(user = %caller, public_id = %stored.public_id, "resume uploaded");
            changes.resume = Some(stored);
        }
        self.apply_changes(profile, changes).await
    }
}
