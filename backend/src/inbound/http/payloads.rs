//! Request bodies accepted by the HTTP adapter.
//!
//! Bodies are deliberately lenient (`Option` everywhere) so missing fields
//! surface as `invalid_request` errors naming the field instead of opaque
//! JSON deserialisation failures. Conversion into domain inputs happens here,
//! at the boundary, and nowhere else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApplicationStatus, Education, EmailAddress, Experience, JobFields, JobType,
    JobValidationError, ProfileChanges, ProfileSync, Salary, SeniorityLevel, UserRole,
};
use crate::domain::{Error, JobSearchFilters};
use crate::inbound::http::validation::{
    FieldName, field_error, invalid_value_error, missing_field_error, parse_optional,
    require_text,
};

const STATUS: FieldName = FieldName::new("status");
const ROLE: FieldName = FieldName::new("role");
const EMAIL: FieldName = FieldName::new("email");
const TYPE: FieldName = FieldName::new("type");

fn job_field_error(err: &JobValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

/// A list supplied either as an array or as newline-separated text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TextList {
    /// `["Ship features", "Review code"]`
    Items(Vec<String>),
    /// `"Ship features\nReview code"`
    Text(String),
}

impl Default for TextList {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl TextList {
    fn into_items(self) -> Vec<String> {
        match self {
            Self::Items(items) => items,
            Self::Text(text) => text.lines().map(str::to_owned).collect(),
        }
    }
}

/// Structured salary as sent by current clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryBody {
    #[schema(example = 50000)]
    pub min: Option<u32>,
    #[schema(example = 70000)]
    pub max: Option<u32>,
    #[schema(example = "USD")]
    pub currency: Option<String>,
    pub negotiable: bool,
}

/// Salary in either the structured form or legacy free text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SalaryInput {
    Structured(SalaryBody),
    /// e.g. `"50000-70000 USD"`, `"$60k"`, `"Negotiable"`.
    Text(String),
}

impl SalaryInput {
    /// Normalise into the canonical salary; blank text means no salary.
    fn into_salary(self) -> Result<Option<Salary>, JobValidationError> {
        match self {
            Self::Structured(body) => {
                let currency = body.currency.as_deref();
                Salary::new(body.min, body.max, currency, body.negotiable).map(Some)
            }
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => Salary::parse(&text).map(Some),
        }
    }
}

/// Body of `POST /api/jobs`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct JobBody {
    #[schema(example = "Backend Engineer")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub responsibilities: TextList,
    pub requirements: TextList,
    #[schema(example = "Engineering")]
    pub category: Option<String>,
    #[schema(example = "Full-time")]
    pub job_type: Option<String>,
    #[schema(example = "Remote")]
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub salary: Option<SalaryInput>,
    #[schema(example = "Intermediate")]
    pub seniority_level: Option<String>,
}

impl TryFrom<JobBody> for JobFields {
    type Error = Error;

    fn try_from(body: JobBody) -> Result<Self, Self::Error> {
        let job_type = body
            .job_type
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.trim().parse::<JobType>())
            .transpose()
            .map_err(|err| job_field_error(&err))?;
        let seniority_level = body
            .seniority_level
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.trim().parse::<SeniorityLevel>())
            .transpose()
            .map_err(|err| job_field_error(&err))?;
        let salary = match body.salary {
            Some(input) => input.into_salary().map_err(|err| job_field_error(&err))?,
            None => None,
        };
        Ok(Self {
            title: body.title,
            description: body.description,
            responsibilities: body.responsibilities.into_items(),
            requirements: body.requirements.into_items(),
            category: body.category,
            job_type,
            location: body.location,
            company_name: body.company_name,
            salary,
            seniority_level,
        })
    }
}

/// Query string of `GET /api/jobs`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct JobSearchQuery {
    /// Case-insensitive substring of the title.
    pub keyword: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Exact job type, e.g. `Full-time`.
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

impl TryFrom<JobSearchQuery> for JobSearchFilters {
    type Error = Error;

    fn try_from(query: JobSearchQuery) -> Result<Self, Self::Error> {
        let job_type = parse_optional::<JobType>(
            query.job_type,
            TYPE,
            "type must be one of Full-time, Part-time, Contract, Internship, Freelance",
        )?;
        Ok(Self {
            keyword: query.keyword,
            location: query.location,
            category: query.category,
            job_type,
        })
    }
}

/// Body of `POST /api/applications/apply`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub job_id: Option<String>,
    pub cover_letter: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "2026-04-01")]
    pub expected_joining_date: Option<NaiveDate>,
    #[schema(example = "90k")]
    pub expected_salary: Option<String>,
}

/// Body of `POST /api/saved-jobs`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveJobBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub job_id: Option<String>,
}

/// Body of `PATCH /api/jobs/{jobId}/applicants/{applicantId}/status`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StatusBody {
    #[schema(example = "Accepted")]
    pub status: Option<String>,
}

impl StatusBody {
    /// The requested decision.
    pub fn decision(self) -> Result<ApplicationStatus, Error> {
        let raw = require_text(self.status, STATUS)?;
        let trimmed = raw.trim();
        trimmed.parse::<ApplicationStatus>().map_err(|_| {
            invalid_value_error(STATUS, trimmed, "status must be one of Accepted, Rejected")
        })
    }
}

/// Query string of `GET /api/jobs/{jobId}/applicants`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ApplicantFilter {
    /// Only applications in this status.
    pub status: Option<String>,
}

impl ApplicantFilter {
    /// Parsed status filter.
    pub fn status(self) -> Result<Option<ApplicationStatus>, Error> {
        parse_optional(
            self.status,
            STATUS,
            "status must be one of Pending, Accepted, Rejected",
        )
    }
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileBody {
    pub name: Option<String>,
    #[schema(example = "job_seeker")]
    pub role: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub gender: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1995-05-17")]
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub desired_job_title: Option<String>,
    pub preferred_category: Option<String>,
    pub preferred_location: Option<String>,
    pub expected_salary: Option<String>,
    pub job_type_preference: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub education: Option<Vec<Education>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub experience: Option<Vec<Experience>>,
}

impl TryFrom<ProfileBody> for ProfileChanges {
    type Error = Error;

    fn try_from(body: ProfileBody) -> Result<Self, Self::Error> {
        let role = parse_optional::<UserRole>(
            body.role,
            ROLE,
            "role must be one of job_seeker, recruiter",
        )?;
        Ok(Self {
            email: None,
            name: body.name,
            role,
            company_name: body.company_name,
            company_website: body.company_website,
            bio: body.bio,
            skills: body.skills,
            gender: body.gender,
            date_of_birth: body.date_of_birth,
            phone: body.phone,
            address: body.address,
            desired_job_title: body.desired_job_title,
            preferred_category: body.preferred_category,
            preferred_location: body.preferred_location,
            expected_salary: body.expected_salary,
            job_type_preference: body.job_type_preference,
            education: body.education,
            experience: body.experience,
            resume: None,
        })
    }
}

/// Body of `POST /api/users/sync`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncBody {
    #[schema(example = "sam@example.com")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileBody,
}

impl TryFrom<SyncBody> for ProfileSync {
    type Error = Error;

    fn try_from(body: SyncBody) -> Result<Self, Self::Error> {
        let raw = body.email.ok_or_else(|| missing_field_error(EMAIL))?;
        let email = EmailAddress::new(&raw)
            .map_err(|_| invalid_value_error(EMAIL, &raw, "email must be a valid address"))?;
        Ok(Self {
            email,
            changes: ProfileChanges::try_from(body.profile)?,
        })
    }
}

#[cfg(test)]
#[path = "payloads_tests.rs"]
mod tests;
