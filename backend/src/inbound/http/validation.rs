//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{ApplicationId, Error, JobId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
    InvalidMultipart,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidMultipart => "invalid_multipart",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_value_error(
    field: FieldName,
    value: &str,
    reason: impl Into<String>,
) -> Error {
    ValidationError::new(field, reason).with_value(ErrorCode::InvalidValue, value)
}

pub(crate) fn invalid_multipart_error(field: FieldName, reason: impl Into<String>) -> Error {
    ValidationError::new(field, reason).with_code(ErrorCode::InvalidMultipart)
}

/// Field error carrying a domain-specific code such as `invalid_job_type`.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    ValidationError::new(field, format!("{} must be a valid UUID", field.as_str()))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_job_id(value: &str, field: FieldName) -> Result<JobId, Error> {
    JobId::from_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_application_id(
    value: &str,
    field: FieldName,
) -> Result<ApplicationId, Error> {
    ApplicationId::from_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

/// Require a non-blank text value.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse an optional enum-like value, rejecting unknown spellings.
pub(crate) fn parse_optional<T: FromStr>(
    value: Option<String>,
    field: FieldName,
    reason: &str,
) -> Result<Option<T>, Error> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.parse::<T>().map_err(|_| invalid_value_error(field, &raw, reason)))
        .transpose()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ApplicationStatus, ErrorCode as DomainCode};
    use rstest::rstest;

    const JOB_ID: FieldName = FieldName::new("jobId");
    const STATUS: FieldName = FieldName::new("status");

    #[rstest]
    fn parses_job_ids() {
        let id = parse_job_id(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", JOB_ID).expect("valid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn invalid_ids_report_field_and_value() {
        let err = parse_job_id("nope", JOB_ID).expect_err("invalid");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "jobId", "value": "nope", "code": "invalid_uuid" }))
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    fn blank_text_is_missing(#[case] value: Option<String>) {
        let err = require_text(value, JOB_ID).expect_err("missing");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "jobId", "code": "missing_field" }))
        );
    }

    #[rstest]
    fn optional_values_parse_or_reject() {
        let parsed: Option<ApplicationStatus> =
            parse_optional(Some("Accepted".to_owned()), STATUS, "bad status").expect("valid");
        assert_eq!(parsed, Some(ApplicationStatus::Accepted));

        let none: Option<ApplicationStatus> =
            parse_optional(Some(" ".to_owned()), STATUS, "bad status").expect("blank");
        assert!(none.is_none());

        let err = parse_optional::<ApplicationStatus>(Some("Maybe".to_owned()), STATUS, "bad")
            .expect_err("unknown");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "status", "value": "Maybe", "code": "invalid_value" }))
        );
    }
}
