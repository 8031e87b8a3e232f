//! User profiles linked to the external identity provider.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identity reference was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identity reference contains unsupported characters or is too long.
    #[error("user id must be at most {max} characters of letters, digits or _|.:@-")]
    InvalidId {
        /// Maximum accepted length.
        max: usize,
    },
    /// The email address is not well formed.
    #[error("email address is not valid")]
    InvalidEmail,
    /// The role is not recognised.
    #[error("role must be job_seeker or recruiter")]
    InvalidRole,
}

/// Maximum accepted length of an identity reference.
pub const USER_ID_MAX: usize = 128;

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn user_id_regex() -> &'static Regex {
    USER_ID_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_|.:@-]+$")
            .unwrap_or_else(|error| panic!("user id regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// External identity reference, taken from the verified token subject.
///
/// # Examples
/// ```
/// use trustyhire::domain::UserId;
///
/// let id = UserId::new("user_2abc").expect("valid id");
/// assert_eq!(id.as_ref(), "user_2abc");
/// assert!(UserId::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.chars().count() > USER_ID_MAX || !user_id_regex().is_match(&id) {
            return Err(UserValidationError::InvalidId { max: USER_ID_MAX });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role a user acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Applies to and bookmarks jobs.
    #[default]
    JobSeeker,
    /// Owns job postings and triages applicants.
    Recruiter,
}

impl UserRole {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JobSeeker => "job_seeker",
            Self::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job_seeker" => Ok(Self::JobSeeker),
            "recruiter" => Ok(Self::Recruiter),
            _ => Err(UserValidationError::InvalidRole),
        }
    }
}

/// One entry in a seeker's education history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub subject: Option<String>,
    pub result: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One entry in a seeker's work history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    #[serde(rename = "type")]
    pub employment_type: Option<String>,
    pub responsibilities: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
}

/// Object-store reference to an uploaded resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRef {
    pub public_id: String,
    pub url: String,
}

/// Full user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub role: UserRole,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub desired_job_title: Option<String>,
    pub preferred_category: Option<String>,
    pub preferred_location: Option<String>,
    pub expected_salary: Option<String>,
    pub job_type_preference: Option<String>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub resume: Option<ResumeRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a fresh profile for a newly synced identity.
    pub fn new(id: UserId, email: EmailAddress, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            name: None,
            role: UserRole::default(),
            company_name: None,
            company_website: None,
            bio: None,
            skills: Vec::new(),
            gender: None,
            date_of_birth: None,
            phone: None,
            address: None,
            desired_job_title: None,
            preferred_category: None,
            preferred_location: None,
            expected_salary: None,
            job_type_preference: None,
            education: Vec::new(),
            experience: Vec::new(),
            resume: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown to other users, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.email.as_ref())
    }
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileChanges {
    pub email: Option<EmailAddress>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub desired_job_title: Option<String>,
    pub preferred_category: Option<String>,
    pub preferred_location: Option<String>,
    pub expected_salary: Option<String>,
    pub job_type_preference: Option<String>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub resume: Option<ResumeRef>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl ProfileChanges {
    /// Drop blank text fields so they never overwrite stored values.
    #[must_use]
    pub fn without_blanks(self) -> Self {
        Self {
            name: non_empty(self.name),
            company_name: non_empty(self.company_name),
            company_website: non_empty(self.company_website),
            bio: non_empty(self.bio),
            gender: non_empty(self.gender),
            phone: non_empty(self.phone),
            address: non_empty(self.address),
            desired_job_title: non_empty(self.desired_job_title),
            preferred_category: non_empty(self.preferred_category),
            preferred_location: non_empty(self.preferred_location),
            expected_salary: non_empty(self.expected_salary),
            job_type_preference: non_empty(self.job_type_preference),
            skills: self.skills.map(|skills| {
                skills
                    .into_iter()
                    .filter_map(|skill| non_empty(Some(skill)))
                    .collect()
            }),
            ..self
        }
    }

    /// Apply the supplied fields onto `profile`.
    pub fn apply_to(self, profile: &mut UserProfile, now: DateTime<Utc>) {
        macro_rules! overwrite {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = self.$field {
                        profile.$field = value;
                    }
                )*
            };
        }
        macro_rules! overwrite_optional {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = self.$field {
                        profile.$field = Some(value);
                    }
                )*
            };
        }

        overwrite!(email, role, skills, education, experience);
        overwrite_optional!(
            name,
            company_name,
            company_website,
            bio,
            gender,
            date_of_birth,
            phone,
            address,
            desired_job_title,
            preferred_category,
            preferred_location,
            expected_salary,
            job_type_preference,
            resume,
        );
        profile.updated_at = now;
    }
}

/// Identity details pushed by the client after sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSync {
    pub email: EmailAddress,
    pub changes: ProfileChanges,
}

#[cfg(test)]
mod tests;
