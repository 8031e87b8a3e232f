//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.
//!
//! The `(job_id, seeker_id)` unique constraint is the final guard against
//! duplicate applications; its violation maps to
//! [`ApplicationRepositoryError::Duplicate`].

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    ApplicantStats, Application, ApplicationId, ApplicationStatus, JobId, JobStatus, UserId,
};

use super::diesel_helpers::{DbFailure, bounded, collect_rows, pool_failure};
use super::models::{ApplicationRow, NewApplicationRow};
use super::pool::DbPool;
use super::schema::{applications, jobs};

const JOB_SEEKER_CONSTRAINT: &str = "applications_job_seeker_key";

/// Diesel-backed implementation of the `ApplicationRepository` port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> ApplicationRepositoryError {
    match failure {
        failure if failure.is_unique_violation_of(JOB_SEEKER_CONSTRAINT) => {
            ApplicationRepositoryError::duplicate()
        }
        DbFailure::UniqueViolation { .. } => {
            ApplicationRepositoryError::query("application already exists")
        }
        DbFailure::Connection(message) => ApplicationRepositoryError::connection(message),
        DbFailure::Query(message) => ApplicationRepositoryError::query(message),
    }
}

fn to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    Application::try_from(row).map_err(ApplicationRepositoryError::query)
}

fn to_applications(
    rows: Vec<ApplicationRow>,
) -> Result<Vec<Application>, ApplicationRepositoryError> {
    collect_rows(
        rows.into_iter().map(Application::try_from),
        ApplicationRepositoryError::query,
    )
}

fn tally(counts: Vec<(String, i64)>) -> Result<ApplicantStats, ApplicationRepositoryError> {
    let mut stats = ApplicantStats::default();
    for (status, count) in counts {
        let status = ApplicationStatus::from_str(&status)
            .map_err(|err| ApplicationRepositoryError::query(err.to_string()))?;
        let count = u64::try_from(count)
            .map_err(|_| ApplicationRepositoryError::query("negative application count"))?;
        stats.record(status, count);
    }
    Ok(stats)
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let row = NewApplicationRow::from(application);
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        bounded(self.pool.query_timeout(), "insert application", async {
            diesel::insert_into(applications::table)
                .values(&row)
                .execute(&mut conn)
                .await
        })
        .await
        .map(|_| ())
        .map_err(map_failure)
    }

    async fn find_for_seeker(
        &self,
        job_id: &JobId,
        seeker_id: &UserId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let job = *job_id.as_uuid();
        let seeker = seeker_id.as_ref().to_owned();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<ApplicationRow> =
            bounded(self.pool.query_timeout(), "find seeker application", async {
                applications::table
                    .filter(
                        applications::job_id
                            .eq(job)
                            .and(applications::seeker_id.eq(seeker)),
                    )
                    .select(ApplicationRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
            })
            .await
            .map_err(map_failure)?;

        row.map(to_application).transpose()
    }

    async fn find_in_job(
        &self,
        job_id: &JobId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let job = *job_id.as_uuid();
        let application = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<ApplicationRow> =
            bounded(self.pool.query_timeout(), "find job application", async {
                applications::table
                    .filter(
                        applications::id
                            .eq(application)
                            .and(applications::job_id.eq(job)),
                    )
                    .select(ApplicationRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
            })
            .await
            .map_err(map_failure)?;

        row.map(to_application).transpose()
    }

    async fn list_for_seeker(
        &self,
        seeker_id: &UserId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let seeker = seeker_id.as_ref().to_owned();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<ApplicationRow> =
            bounded(self.pool.query_timeout(), "list seeker applications", async {
                applications::table
                    .filter(applications::seeker_id.eq(seeker))
                    .select(ApplicationRow::as_select())
                    .order_by(applications::applied_at.desc())
                    .load(&mut conn)
                    .await
            })
            .await
            .map_err(map_failure)?;

        to_applications(rows)
    }

    async fn list_for_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut query = applications::table
            .filter(applications::job_id.eq(*job_id.as_uuid()))
            .select(ApplicationRow::as_select())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(applications::status.eq(status.as_str()));
        }
        let query = query.order_by(applications::applied_at.desc());
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<ApplicationRow> =
            bounded(self.pool.query_timeout(), "list job applications", async {
                query.load(&mut conn).await
            })
            .await
            .map_err(map_failure)?;

        to_applications(rows)
    }

    async fn decide(
        &self,
        job_id: &JobId,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let job = *job_id.as_uuid();
        let application = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<ApplicationRow> =
            bounded(self.pool.query_timeout(), "decide application", async {
                let published_job = jobs::table
                    .filter(
                        jobs::id
                            .eq(job)
                            .and(jobs::status.eq(JobStatus::Published.as_str())),
                    )
                    .select(jobs::id);
                diesel::update(
                    applications::table.filter(
                        applications::id
                            .eq(application)
                            .and(applications::job_id.eq(job))
                            .and(applications::status.eq(ApplicationStatus::Pending.as_str()))
                            .and(applications::job_id.eq_any(published_job)),
                    ),
                )
                .set((
                    applications::status.eq(status.as_str()),
                    applications::decided_at.eq(Some(at)),
                ))
                .returning(ApplicationRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
            })
            .await
            .map_err(map_failure)?;

        row.map(to_application).transpose()
    }

    async fn count_by_status(
        &self,
        job_id: &JobId,
    ) -> Result<ApplicantStats, ApplicationRepositoryError> {
        let job = *job_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let counts: Vec<(String, i64)> =
            bounded(self.pool.query_timeout(), "count applications", async {
                applications::table
                    .filter(applications::job_id.eq(job))
                    .group_by(applications::status)
                    .select((applications::status, count_star()))
                    .load(&mut conn)
                    .await
            })
            .await
            .map_err(map_failure)?;

        tally(counts)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and aggregation coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn job_seeker_violation_is_a_duplicate() {
        let failure = DbFailure::UniqueViolation {
            constraint: Some(JOB_SEEKER_CONSTRAINT.to_owned()),
        };
        assert_eq!(map_failure(failure), ApplicationRepositoryError::Duplicate);
    }

    #[rstest]
    fn other_unique_violations_are_query_errors() {
        let failure = DbFailure::UniqueViolation {
            constraint: Some("applications_pkey".to_owned()),
        };
        assert!(matches!(
            map_failure(failure),
            ApplicationRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn counts_are_tallied_per_status() {
        let stats = tally(vec![
            ("Pending".to_owned(), 3),
            ("Accepted".to_owned(), 1),
            ("Rejected".to_owned(), 2),
        ])
        .expect("known statuses");
        assert_eq!(
            (stats.total, stats.pending, stats.accepted, stats.rejected),
            (6, 3, 1, 2)
        );
    }

    #[rstest]
    fn unknown_statuses_fail_the_tally() {
        assert!(tally(vec![("Shortlisted".to_owned(), 1)]).is_err());
    }
}
