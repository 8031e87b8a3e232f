//! Error mapping and helpers shared by the domain services.

use serde_json::json;
use tracing::warn;

use crate::domain::ports::{
    ApplicationRepositoryError, JobRepositoryError, Notification, Notifier,
    SavedJobRepositoryError, UserRepositoryError,
};
use crate::domain::{Error, Job, JobId, UserId};

/// Validation failure naming the offending field.
pub(crate) fn invalid_field(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn map_job_repository_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::unavailable(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

pub(crate) fn map_application_repository_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Duplicate => {
            Error::duplicate_application("you have already applied to this job")
                .with_details(json!({ "alreadyApplied": true }))
        }
        ApplicationRepositoryError::Connection { message } => {
            Error::unavailable(format!("application repository unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
    }
}

pub(crate) fn map_saved_job_repository_error(error: SavedJobRepositoryError) -> Error {
    match error {
        SavedJobRepositoryError::Duplicate => Error::already_saved("job is already saved")
            .with_details(json!({ "alreadySaved": true })),
        SavedJobRepositoryError::Connection { message } => {
            Error::unavailable(format!("saved job repository unavailable: {message}"))
        }
        SavedJobRepositoryError::Query { message } => {
            Error::internal(format!("saved job repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::EmailTaken => invalid_field(
            "email",
            "email_taken",
            "email address is already used by another account",
        ),
        UserRepositoryError::Missing => Error::not_found("profile not found"),
        UserRepositoryError::AlreadyExists => {
            Error::internal("profile was created concurrently")
        }
        UserRepositoryError::Connection { message } => {
            Error::unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn job_not_found(job_id: &JobId) -> Error {
    Error::not_found(format!("job {job_id} not found"))
}

/// Ensure `caller` owns `job`.
pub(crate) fn ensure_owner(job: &Job, caller: &UserId) -> Result<(), Error> {
    if job.is_owned_by(caller) {
        Ok(())
    } else {
        Err(Error::forbidden("only the recruiter who posted this job may do that"))
    }
}

/// Deliver `notification`, logging instead of failing.
pub(crate) async fn notify_best_effort(notifier: &dyn Notifier, notification: Notification) {
    let kind = notification.kind();
    if let Err(error) = notifier.notify(notification).await {
        warn!(%error, kind, "notification not delivered");
    }
}
