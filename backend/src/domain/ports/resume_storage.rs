//! Port for storing resume files in the external object store.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{ResumeRef, UserId};

use super::define_port_error;

/// Accepted resume media types with their file extensions.
const ACCEPTED_TYPES: [(&str, &str); 3] = [
    ("application/pdf", "pdf"),
    ("application/msword", "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
];

/// Validation errors for resume uploads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeValidationError {
    /// The file was empty.
    #[error("resume file is empty")]
    Empty,
    /// The file exceeded the configured size limit.
    #[error("resume must be at most {max_bytes} bytes")]
    TooLarge {
        /// Configured limit.
        max_bytes: usize,
    },
    /// The file is not a PDF or Word document.
    #[error("resume must be a PDF, DOC or DOCX file")]
    UnsupportedType,
}

/// A validated resume file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

impl ResumeUpload {
    /// Validate an uploaded file.
    ///
    /// The type is accepted when either the declared media type or the file
    /// extension names a PDF or Word document.
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<&str>,
        bytes: Bytes,
        max_bytes: usize,
    ) -> Result<Self, ResumeValidationError> {
        if bytes.is_empty() {
            return Err(ResumeValidationError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(ResumeValidationError::TooLarge { max_bytes });
        }
        let file_name = file_name.into();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let by_type = content_type.and_then(|declared| {
            ACCEPTED_TYPES
                .iter()
                .find(|(media, _)| declared.eq_ignore_ascii_case(media))
        });
        let by_extension = extension
            .as_deref()
            .and_then(|ext| ACCEPTED_TYPES.iter().find(|(_, known)| *known == ext));
        let (media, _) = by_type
            .or(by_extension)
            .ok_or(ResumeValidationError::UnsupportedType)?;
        Ok(Self {
            file_name,
            content_type: (*media).to_owned(),
            bytes,
        })
    }

    /// Original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Canonical media type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File contents.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

define_port_error! {
    /// Failures raised by resume storage adapters.
    pub enum ResumeStorageError {
        /// No object store is configured.
        Disabled => "resume storage is not configured",
        /// The store could not be reached.
        Connection { message: String } => "resume storage unreachable: {message}",
        /// The store refused the upload.
        Rejected { message: String } => "resume upload rejected: {message}",
    }
}

/// Driven port uploading resumes to the object store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeStorage: Send + Sync {
    /// Upload `file` on behalf of `owner`.
    async fn upload(
        &self,
        owner: &UserId,
        file: ResumeUpload,
    ) -> Result<ResumeRef, ResumeStorageError>;
}

/// Storage used when no object store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledResumeStorage;

#[async_trait]
impl ResumeStorage for DisabledResumeStorage {
    async fn upload(
        &self,
        _owner: &UserId,
        _file: ResumeUpload,
    ) -> Result<ResumeRef, ResumeStorageError> {
        Err(ResumeStorageError::disabled())
    }
}
