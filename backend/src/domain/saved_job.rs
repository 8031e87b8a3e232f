//! Job bookmarks kept by seekers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Job, JobId, JobSnapshot, UserId};

/// A bookmark with the job's title and company cached at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub user_id: UserId,
    pub job_id: JobId,
    pub job_title: String,
    pub company_name: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedJob {
    /// Bookmark `job` for `user_id`.
    pub fn of(user_id: UserId, job: &Job, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            job_id: job.id,
            job_title: job.title.clone(),
            company_name: job.company_name.clone(),
            saved_at: now,
        }
    }
}

/// Bookmark joined with the live job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobEntry {
    #[serde(flatten)]
    pub saved: SavedJob,
    pub job: JobSnapshot,
}

/// Whether a job is bookmarked by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobStatus {
    pub is_saved: bool,
}
