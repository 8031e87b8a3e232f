//! Profile update bodies: plain JSON or `multipart/form-data`.
//!
//! A multipart body carries a `profile` part holding the same JSON as the
//! plain form and an optional `resume` file part. Unknown parts are ignored.
//!
//! actix payload streams are not `Send`, so the body is buffered (bounded by
//! the resume limit plus [`FORM_OVERHEAD_BYTES`]) before being handed to
//! `multer` as a single-chunk stream.

use actix_web::HttpRequest;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::web;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;

use crate::domain::Error;
use crate::domain::ports::{ResumeUpload, ResumeValidationError};
use crate::inbound::http::payloads::ProfileBody;
use crate::inbound::http::validation::{FieldName, field_error, invalid_multipart_error};

const PROFILE: FieldName = FieldName::new("profile");
const RESUME: FieldName = FieldName::new("resume");
const BODY: FieldName = FieldName::new("body");

/// Allowance for the profile part, part headers and boundaries.
pub const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// A parsed profile update.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub profile: ProfileBody,
    pub resume: Option<ResumeUpload>,
}

/// Read a profile update from the request body.
pub async fn read_profile_update(
    request: &HttpRequest,
    payload: web::Payload,
    max_resume_bytes: usize,
) -> Result<ProfileUpdate, Error> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let limit = max_resume_bytes.saturating_add(FORM_OVERHEAD_BYTES);
    let body = collect_body(payload, limit, max_resume_bytes).await?;
    parse_profile_update(content_type.as_deref(), body, max_resume_bytes).await
}

async fn collect_body(
    mut payload: web::Payload,
    limit: usize,
    max_resume_bytes: usize,
) -> Result<Bytes, Error> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| invalid_multipart_error(BODY, err.to_string()))?;
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(resume_error(&ResumeValidationError::TooLarge {
                max_bytes: max_resume_bytes,
            }));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

/// Parse a buffered body according to its content type.
pub async fn parse_profile_update(
    content_type: Option<&str>,
    body: Bytes,
    max_resume_bytes: usize,
) -> Result<ProfileUpdate, Error> {
    match content_type {
        Some(value) if is_multipart(value) => parse_multipart(value, body, max_resume_bytes).await,
        _ => Ok(ProfileUpdate {
            profile: parse_profile_json(&body, BODY)?,
            resume: None,
        }),
    }
}

fn parse_profile_json(raw: &[u8], field: FieldName) -> Result<ProfileBody, Error> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProfileBody::default());
    }
    serde_json::from_slice(raw).map_err(|err| {
        field_error(
            field.as_str(),
            "invalid_json",
            format!("{} must be a JSON object: {err}", field.as_str()),
        )
    })
}

async fn parse_multipart(
    content_type: &str,
    body: Bytes,
    max_resume_bytes: usize,
) -> Result<ProfileUpdate, Error> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|err| invalid_multipart_error(BODY, err.to_string()))?;
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut update = ProfileUpdate::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| invalid_multipart_error(BODY, err.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("profile") => {
                let raw = field
                    .bytes()
                    .await
                    .map_err(|err| invalid_multipart_error(PROFILE, err.to_string()))?;
                update.profile = parse_profile_json(&raw, PROFILE)?;
            }
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume").to_owned();
                let declared = field.content_type().map(|mime| mime.essence_str().to_owned());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| invalid_multipart_error(RESUME, err.to_string()))?;
                let upload =
                    ResumeUpload::new(file_name, declared.as_deref(), bytes, max_resume_bytes)
                        .map_err(|err| resume_error(&err))?;
                update.resume = Some(upload);
            }
            other => {
                tracing::debug!(part = ?other, "ignoring unknown multipart part");
            }
        }
    }
    Ok(update)
}

fn resume_error(err: &ResumeValidationError) -> Error {
    let code = match err {
        ResumeValidationError::Empty => "empty_file",
        ResumeValidationError::TooLarge { .. } => "file_too_large",
        ResumeValidationError::UnsupportedType => "unsupported_file_type",
    };
    field_error(RESUME.as_str(), code, err.to_string())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    const BOUNDARY: &str = "X-TRUSTYHIRE-BOUNDARY";
    const LIMIT: usize = 64;

    fn form_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    fn form(parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Bytes {
        let mut body = Vec::new();
        for (name, file, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file {
                Some((file_name, media)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; \
                         filename=\"{file_name}\"\r\nContent-Type: {media}\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Bytes::from(body)
    }

    fn detail_code(err: &Error) -> Option<&str> {
        err.details()
            .and_then(|details| details.get("code"))
            .and_then(serde_json::Value::as_str)
    }

    #[rstest]
    #[tokio::test]
    async fn plain_json_bodies_carry_no_resume() {
        let body = Bytes::from(json!({ "name": "Sam", "skills": ["Rust"] }).to_string());
        let update = parse_profile_update(Some("application/json"), body, LIMIT)
            .await
            .expect("json body");
        assert_eq!(update.profile.name.as_deref(), Some("Sam"));
        assert_eq!(update.profile.skills, Some(vec!["Rust".to_owned()]));
        assert!(update.resume.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn empty_bodies_change_nothing() {
        let update = parse_profile_update(None, Bytes::new(), LIMIT)
            .await
            .expect("empty body");
        assert!(update.profile.name.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let err = parse_profile_update(None, Bytes::from_static(b"{name"), LIMIT)
            .await
            .expect_err("bad json");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail_code(&err), Some("invalid_json"));
    }

    #[rstest]
    #[tokio::test]
    async fn multipart_reads_profile_and_resume() {
        let body = form(&[
            ("profile", None, br#"{"bio":"Backend developer"}"#.as_slice()),
            ("resume", Some(("cv.pdf", "application/pdf")), b"%PDF-1.7".as_slice()),
            ("extra", None, b"ignored".as_slice()),
        ]);
        let update = parse_profile_update(Some(&form_type()), body, LIMIT)
            .await
            .expect("multipart body");
        assert_eq!(update.profile.bio.as_deref(), Some("Backend developer"));
        let resume = update.resume.expect("resume part");
        assert_eq!(resume.file_name(), "cv.pdf");
        assert_eq!(resume.content_type(), "application/pdf");
        assert_eq!(resume.bytes().as_ref(), b"%PDF-1.7");
    }

    #[rstest]
    #[tokio::test]
    async fn resume_without_profile_part_is_accepted() {
        let body = form(&[(
            "resume",
            Some(("cv.docx", "application/octet-stream")),
            b"PK".as_slice(),
        )]);
        let update = parse_profile_update(Some(&form_type()), body, LIMIT)
            .await
            .expect("multipart body");
        assert!(update.profile.name.is_none());
        assert!(update.resume.is_some());
    }

    #[rstest]
    #[case::unsupported(("cv.png", "image/png"), b"png", "unsupported_file_type")]
    #[case::empty(("cv.pdf", "application/pdf"), b"", "empty_file")]
    #[case::too_large(("cv.pdf", "application/pdf"), &[0_u8; LIMIT + 1], "file_too_large")]
    #[tokio::test]
    async fn invalid_resumes_are_rejected(
        #[case] file: (&str, &str),
        #[case] content: &[u8],
        #[case] code: &str,
    ) {
        let body = form(&[("resume", Some(file), content)]);
        let err = parse_profile_update(Some(&form_type()), body, LIMIT)
            .await
            .expect_err("invalid resume");
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&json!("resume"))
        );
        assert_eq!(detail_code(&err), Some(code));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_boundary_is_rejected() {
        let err = parse_profile_update(Some("multipart/form-data"), Bytes::new(), LIMIT)
            .await
            .expect_err("no boundary");
        assert_eq!(detail_code(&err), Some("invalid_multipart"));
    }
}
