//! Recording stand-ins for the mail relay and the object store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    Notification, Notifier, NotifierError, ResumeStorage, ResumeStorageError, ResumeUpload,
};
use crate::domain::{ResumeRef, UserId};

/// Notifier keeping every notification it was handed.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: bool,
}

impl RecordingNotifier {
    /// A notifier that records and then reports a delivery failure.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            failing: true,
        }
    }

    /// Notifications handed over so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        if self.failing {
            return Err(NotifierError::delivery("relay refused the message"));
        }
        Ok(())
    }
}

/// Object store that accepts every upload and remembers the file names.
#[derive(Debug, Default)]
pub struct MemoryResumeStorage {
    uploads: Mutex<Vec<(UserId, String)>>,
}

impl MemoryResumeStorage {
    /// `(owner, file name)` pairs uploaded so far.
    pub fn uploads(&self) -> Vec<(UserId, String)> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ResumeStorage for MemoryResumeStorage {
    async fn upload(
        &self,
        owner: &UserId,
        file: ResumeUpload,
    ) -> Result<ResumeRef, ResumeStorageError> {
        let public_id = format!("resumes/{owner}/{}", file.file_name());
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((owner.clone(), file.file_name().to_owned()));
        Ok(ResumeRef {
            url: format!("https://files.trustyhire.test/{public_id}"),
            public_id,
        })
    }
}
