//! Internal Diesel row structs and their domain conversions.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. Conversions from rows return `String` errors
//! which the repositories map onto their `Query` port error.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationId, ApplicationStatus, CoverLetter, Education, EmailAddress,
    Experience, Job, JobId, JobStatus, JobType, ResumeRef, Salary, SavedJob, SeniorityLevel,
    UserId, UserProfile, UserRole,
};

use super::schema::{applications, jobs, saved_jobs, users};

const DEFAULT_CURRENCY: &str = "USD";

fn user_id(raw: String) -> Result<UserId, String> {
    UserId::new(raw).map_err(|err| format!("stored user id is invalid: {err}"))
}

fn email(raw: &str) -> Result<EmailAddress, String> {
    EmailAddress::new(raw).map_err(|err| format!("stored email is invalid: {err}"))
}

fn amount_from_db(value: Option<i32>) -> Result<Option<u32>, String> {
    value
        .map(|raw| u32::try_from(raw).map_err(|_| format!("stored salary {raw} is negative")))
        .transpose()
}

fn amount_for_db(value: Option<u32>) -> Result<Option<i32>, String> {
    value
        .map(|raw| i32::try_from(raw).map_err(|_| format!("salary {raw} exceeds storage range")))
        .transpose()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
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
    pub education: serde_json::Value,
    pub experience: serde_json::Value,
    pub resume_public_id: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable and changeset form of a profile.
///
/// `treat_none_as_null` makes updates clear columns whose domain value is
/// `None`, so the stored row always mirrors the profile.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRecord<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub role: &'a str,
    pub company_name: Option<&'a str>,
    pub company_website: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub skills: &'a [String],
    pub gender: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub desired_job_title: Option<&'a str>,
    pub preferred_category: Option<&'a str>,
    pub preferred_location: Option<&'a str>,
    pub expected_salary: Option<&'a str>,
    pub job_type_preference: Option<&'a str>,
    pub education: serde_json::Value,
    pub experience: serde_json::Value,
    pub resume_public_id: Option<&'a str>,
    pub resume_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserRecord<'a> {
    pub(crate) fn from_profile(profile: &'a UserProfile) -> Result<Self, String> {
        let education = serde_json::to_value(&profile.education)
            .map_err(|err| format!("education is not serialisable: {err}"))?;
        let experience = serde_json::to_value(&profile.experience)
            .map_err(|err| format!("experience is not serialisable: {err}"))?;
        Ok(Self {
            id: profile.id.as_ref(),
            email: profile.email.as_ref(),
            name: profile.name.as_deref(),
            role: profile.role.as_str(),
            company_name: profile.company_name.as_deref(),
            company_website: profile.company_website.as_deref(),
            bio: profile.bio.as_deref(),
            skills: &profile.skills,
            gender: profile.gender.as_deref(),
            date_of_birth: profile.date_of_birth,
            phone: profile.phone.as_deref(),
            address: profile.address.as_deref(),
            desired_job_title: profile.desired_job_title.as_deref(),
            preferred_category: profile.preferred_category.as_deref(),
            preferred_location: profile.preferred_location.as_deref(),
            expected_salary: profile.expected_salary.as_deref(),
            job_type_preference: profile.job_type_preference.as_deref(),
            education,
            experience,
            resume_public_id: profile.resume.as_ref().map(|resume| resume.public_id.as_str()),
            resume_url: profile.resume.as_ref().map(|resume| resume.url.as_str()),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

impl TryFrom<UserRow> for UserProfile {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::from_str(&row.role).map_err(|err| err.to_string())?;
        let education: Vec<Education> = serde_json::from_value(row.education)
            .map_err(|err| format!("stored education is invalid: {err}"))?;
        let experience: Vec<Experience> = serde_json::from_value(row.experience)
            .map_err(|err| format!("stored experience is invalid: {err}"))?;
        let resume = match (row.resume_public_id, row.resume_url) {
            (Some(public_id), Some(url)) => Some(ResumeRef { public_id, url }),
            _ => None,
        };
        Ok(Self {
            email: email(&row.email)?,
            id: user_id(row.id)?,
            name: row.name,
            role,
            company_name: row.company_name,
            company_website: row.company_website,
            bio: row.bio,
            skills: row.skills,
            gender: row.gender,
            date_of_birth: row.date_of_birth,
            phone: row.phone,
            address: row.address,
            desired_job_title: row.desired_job_title,
            preferred_category: row.preferred_category,
            preferred_location: row.preferred_location,
            expected_salary: row.expected_salary,
            job_type_preference: row.job_type_preference,
            education,
            experience,
            resume,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub recruiter_id: String,
    pub recruiter_email: String,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub category: String,
    pub job_type: String,
    pub location: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    pub salary_negotiable: bool,
    pub seniority_level: String,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new jobs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub id: Uuid,
    pub recruiter_id: &'a str,
    pub recruiter_email: &'a str,
    pub company_name: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub responsibilities: &'a [String],
    pub requirements: &'a [String],
    pub category: &'a str,
    pub job_type: &'a str,
    pub location: &'a str,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<&'a str>,
    pub salary_negotiable: bool,
    pub seniority_level: &'a str,
    pub status: &'a str,
    pub published_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewJobRow<'a> {
    pub(crate) fn from_job(job: &'a Job) -> Result<Self, String> {
        let salary = job.salary.as_ref();
        Ok(Self {
            id: *job.id.as_uuid(),
            recruiter_id: job.recruiter_id.as_ref(),
            recruiter_email: job.recruiter_email.as_ref(),
            company_name: &job.company_name,
            title: &job.title,
            description: &job.description,
            responsibilities: &job.responsibilities,
            requirements: &job.requirements,
            category: &job.category,
            job_type: job.job_type.as_str(),
            location: &job.location,
            salary_min: amount_for_db(salary.and_then(|s| s.min))?,
            salary_max: amount_for_db(salary.and_then(|s| s.max))?,
            salary_currency: salary.map(|s| s.currency.as_str()),
            salary_negotiable: salary.is_some_and(|s| s.negotiable),
            seniority_level: job.seniority_level.as_str(),
            status: job.status.as_str(),
            published_at: job.published_at,
            closed_at: job.closed_at,
            views: i64::try_from(job.views).map_err(|_| "view count overflow".to_owned())?,
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }
}

impl TryFrom<JobRow> for Job {
    type Error = String;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let job_type = JobType::from_str(&row.job_type).map_err(|err| err.to_string())?;
        let seniority_level =
            SeniorityLevel::from_str(&row.seniority_level).map_err(|err| err.to_string())?;
        let status = JobStatus::from_str(&row.status).map_err(|err| err.to_string())?;
        let min = amount_from_db(row.salary_min)?;
        let max = amount_from_db(row.salary_max)?;
        let salary = (min.is_some() || max.is_some() || row.salary_negotiable).then(|| Salary {
            min,
            max,
            currency: row
                .salary_currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            negotiable: row.salary_negotiable,
        });
        Ok(Self {
            id: JobId::from_uuid(row.id),
            recruiter_id: user_id(row.recruiter_id)?,
            recruiter_email: email(&row.recruiter_email)?,
            company_name: row.company_name,
            title: row.title,
            description: row.description,
            responsibilities: row.responsibilities,
            requirements: row.requirements,
            category: row.category,
            job_type,
            location: row.location,
            salary,
            seniority_level,
            status,
            published_at: row.published_at,
            closed_at: row.closed_at,
            views: u64::try_from(row.views).map_err(|_| "stored views are negative".to_owned())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// Row struct for reading from the applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub seeker_id: String,
    pub cover_letter: String,
    pub expected_joining_date: Option<NaiveDate>,
    pub expected_salary: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Insertable struct for new applications.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub id: Uuid,
    pub job_id: Uuid,
    pub seeker_id: &'a str,
    pub cover_letter: &'a str,
    pub expected_joining_date: Option<NaiveDate>,
    pub expected_salary: Option<&'a str>,
    pub status: &'a str,
    pub applied_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Application> for NewApplicationRow<'a> {
    fn from(application: &'a Application) -> Self {
        Self {
            id: *application.id.as_uuid(),
            job_id: *application.job_id.as_uuid(),
            seeker_id: application.seeker_id.as_ref(),
            cover_letter: application.cover_letter.as_ref(),
            expected_joining_date: application.expected_joining_date,
            expected_salary: application.expected_salary.as_deref(),
            status: application.status.as_str(),
            applied_at: application.applied_at,
            decided_at: application.decided_at,
        }
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = String;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            job_id: JobId::from_uuid(row.job_id),
            seeker_id: user_id(row.seeker_id)?,
            cover_letter: CoverLetter::new(&row.cover_letter).map_err(|err| err.to_string())?,
            expected_joining_date: row.expected_joining_date,
            expected_salary: row.expected_salary,
            status: ApplicationStatus::from_str(&row.status).map_err(|err| err.to_string())?,
            applied_at: row.applied_at,
            decided_at: row.decided_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Saved jobs
// ---------------------------------------------------------------------------

/// Row struct for reading from the saved_jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = saved_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SavedJobRow {
    pub user_id: String,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub saved_at: DateTime<Utc>,
}

/// Insertable struct for new bookmarks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_jobs)]
pub(crate) struct NewSavedJobRow<'a> {
    pub user_id: &'a str,
    pub job_id: Uuid,
    pub job_title: &'a str,
    pub company_name: &'a str,
    pub saved_at: DateTime<Utc>,
}

impl<'a> From<&'a SavedJob> for NewSavedJobRow<'a> {
    fn from(saved: &'a SavedJob) -> Self {
        Self {
            user_id: saved.user_id.as_ref(),
            job_id: *saved.job_id.as_uuid(),
            job_title: &saved.job_title,
            company_name: &saved.company_name,
            saved_at: saved.saved_at,
        }
    }
}

impl TryFrom<SavedJobRow> for SavedJob {
    type Error = String;

    fn try_from(row: SavedJobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: user_id(row.user_id)?,
            job_id: JobId::from_uuid(row.job_id),
            job_title: row.job_title,
            company_name: row.company_name,
            saved_at: row.saved_at,
        })
    }
}
