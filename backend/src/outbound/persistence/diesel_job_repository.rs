//! PostgreSQL-backed `JobRepository` implementation using Diesel ORM.
//!
//! Lifecycle transitions, draft deletion and view counting are single
//! conditional statements; the `WHERE` clause carries the guard so two
//! racing requests cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobId, JobSearchFilters, JobStatus, JobTransition, UserId};

use super::diesel_helpers::{DbFailure, bounded, collect_rows, contains_pattern, pool_failure};
use super::models::{JobRow, NewJobRow};
use super::pool::DbPool;
use super::schema::jobs;

/// Diesel-backed implementation of the `JobRepository` port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> JobRepositoryError {
    match failure {
        DbFailure::Connection(message) => JobRepositoryError::connection(message),
        DbFailure::UniqueViolation { .. } => JobRepositoryError::query("job already exists"),
        DbFailure::Query(message) => JobRepositoryError::query(message),
    }
}

fn to_job(row: JobRow) -> Result<Job, JobRepositoryError> {
    Job::try_from(row).map_err(JobRepositoryError::query)
}

fn to_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, JobRepositoryError> {
    collect_rows(rows.into_iter().map(Job::try_from), JobRepositoryError::query)
}

const PUBLIC_STATUSES: [&str; 2] = ["published", "closed"];

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        let row = NewJobRow::from_job(job).map_err(JobRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        bounded(self.pool.query_timeout(), "insert job", async {
            diesel::insert_into(jobs::table)
                .values(&row)
                .execute(&mut conn)
                .await
        })
        .await
        .map(|_| ())
        .map_err(map_failure)
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<JobRow> = bounded(self.pool.query_timeout(), "find job", async {
            jobs::table
                .find(*id.as_uuid())
                .select(JobRow::as_select())
                .first(&mut conn)
                .await
                .optional()
        })
        .await
        .map_err(map_failure)?;

        row.map(to_job).transpose()
    }

    async fn find_many(&self, ids: &[JobId]) -> Result<Vec<Job>, JobRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<JobRow> = bounded(self.pool.query_timeout(), "find jobs", async {
            jobs::table
                .filter(jobs::id.eq_any(uuids))
                .select(JobRow::as_select())
                .load(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)?;

        to_jobs(rows)
    }

    async fn apply_transition(
        &self,
        id: &JobId,
        transition: JobTransition,
        at: DateTime<Utc>,
    ) -> Result<Option<Job>, JobRepositoryError> {
        let uuid = *id.as_uuid();
        let from = transition.from_status().as_str();
        let to = transition.to_status().as_str();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<JobRow> = bounded(self.pool.query_timeout(), transition.verb(), async {
            let target = jobs::table.filter(jobs::id.eq(uuid).and(jobs::status.eq(from)));
            let updated = match transition {
                JobTransition::Publish => {
                    diesel::update(target)
                        .set((
                            jobs::status.eq(to),
                            jobs::published_at.eq(Some(at)),
                            jobs::updated_at.eq(at),
                        ))
                        .returning(JobRow::as_returning())
                        .get_result(&mut conn)
                        .await
                }
                JobTransition::Close => {
                    diesel::update(target)
                        .set((
                            jobs::status.eq(to),
                            jobs::closed_at.eq(Some(at)),
                            jobs::updated_at.eq(at),
                        ))
                        .returning(JobRow::as_returning())
                        .get_result(&mut conn)
                        .await
                }
            };
            updated.optional()
        })
        .await
        .map_err(map_failure)?;

        row.map(to_job).transpose()
    }

    async fn delete_draft(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let uuid = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let deleted = bounded(self.pool.query_timeout(), "delete draft", async {
            diesel::delete(
                jobs::table.filter(
                    jobs::id
                        .eq(uuid)
                        .and(jobs::status.eq(JobStatus::Draft.as_str())),
                ),
            )
            .execute(&mut conn)
            .await
        })
        .await
        .map_err(map_failure)?;

        Ok(deleted > 0)
    }

    async fn increment_views(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let uuid = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<JobRow> = bounded(self.pool.query_timeout(), "count view", async {
            diesel::update(
                jobs::table.filter(jobs::id.eq(uuid).and(jobs::status.eq_any(PUBLIC_STATUSES))),
            )
            .set(jobs::views.eq(jobs::views + 1_i64))
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
        })
        .await
        .map_err(map_failure)?;

        row.map(to_job).transpose()
    }

    async fn search(&self, filters: &JobSearchFilters) -> Result<Vec<Job>, JobRepositoryError> {
        let mut query = jobs::table
            .filter(jobs::status.eq(JobStatus::Published.as_str()))
            .select(JobRow::as_select())
            .into_boxed();
        if let Some(keyword) = &filters.keyword {
            query = query.filter(jobs::title.ilike(contains_pattern(keyword)));
        }
        if let Some(location) = &filters.location {
            query = query.filter(jobs::location.eq(location.clone()));
        }
        if let Some(category) = &filters.category {
            query = query.filter(jobs::category.eq(category.clone()));
        }
        if let Some(job_type) = filters.job_type {
            query = query.filter(jobs::job_type.eq(job_type.as_str()));
        }
        let query = query.order_by((jobs::published_at.desc(), jobs::created_at.desc()));
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<JobRow> = bounded(self.pool.query_timeout(), "search jobs", async {
            query.load(&mut conn).await
        })
        .await
        .map_err(map_failure)?;

        to_jobs(rows)
    }

    async fn list_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, JobRepositoryError> {
        let recruiter = recruiter.as_ref().to_owned();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<JobRow> = bounded(self.pool.query_timeout(), "list recruiter jobs", async {
            jobs::table
                .filter(jobs::recruiter_id.eq(recruiter))
                .select(JobRow::as_select())
                .order_by(jobs::created_at.desc())
                .load(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)?;

        to_jobs(rows)
    }
}
