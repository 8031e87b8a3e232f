//! Reqwest-backed resume storage using signed Cloudinary uploads.
//!
//! Uploads are authenticated by a SHA-256 signature over the sorted upload
//! parameters followed by the API secret. The adapter owns transport details
//! only: signing, multipart encoding, HTTP error mapping and decoding the
//! returned asset reference.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::domain::ports::{ResumeStorage, ResumeStorageError, ResumeUpload};
use crate::domain::{ResumeRef, UserId};
use crate::settings::StorageCredentials;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponseDto {
    public_id: String,
    secure_url: String,
}

/// [`ResumeStorage`] that uploads raw documents to a Cloudinary folder.
pub struct CloudinaryResumeStorage {
    client: Client,
    endpoint: String,
    credentials: StorageCredentials,
    clock: Arc<dyn Clock>,
}

impl CloudinaryResumeStorage {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        credentials: StorageCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_api_base(credentials, timeout, clock, DEFAULT_API_BASE)
    }

    /// Build an adapter against a non-default API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_api_base(
        credentials: StorageCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
        api_base: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = format!(
            "{}/{}/raw/upload",
            api_base.trim_end_matches('/'),
            credentials.cloud_name
        );
        Ok(Self {
            client,
            endpoint,
            credentials,
            clock,
        })
    }
}

#[async_trait]
impl ResumeStorage for CloudinaryResumeStorage {
    async fn upload(
        &self,
        owner: &UserId,
        file: ResumeUpload,
    ) -> Result<ResumeRef, ResumeStorageError> {
        let now = self.clock.utc();
        let timestamp = now.timestamp().to_string();
        let public_id = public_id_for(file.file_name(), now.timestamp_millis());
        let params = [
            ("folder", self.credentials.folder.as_str()),
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
        ];
        let signature = sign(&params, &self.credentials.api_secret);

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_owned())
            .mime_str(file.content_type())
            .map_err(|err| ResumeStorageError::rejected(err.to_string()))?;
        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value.to_owned());
        }

        tracing::debug!(owner = %owner, public_id = %public_id, "uploading resume");
        let response = self
            .client
            .post(self.endpoint.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|err| ResumeStorageError::connection(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ResumeStorageError::connection(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_upload(body.as_ref())
    }
}

/// File stem plus a millisecond suffix so re-uploads never collide.
fn public_id_for(file_name: &str, millis: i64) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect::<String>();
    let stem = if stem.is_empty() { "resume".to_owned() } else { stem };
    format!("{stem}_{millis}")
}

fn sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn parse_upload(body: &[u8]) -> Result<ResumeRef, ResumeStorageError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body).map_err(|err| {
        ResumeStorageError::rejected(format!("invalid upload response: {err}"))
    })?;
    Ok(ResumeRef {
        public_id: decoded.public_id,
        url: decoded.secure_url,
    })
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ResumeStorageError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT {
        ResumeStorageError::rejected(message)
    } else {
        ResumeStorageError::connection(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
