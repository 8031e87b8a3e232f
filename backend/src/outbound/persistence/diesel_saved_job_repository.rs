//! PostgreSQL-backed `SavedJobRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SavedJobRepository, SavedJobRepositoryError};
use crate::domain::{JobId, SavedJob, UserId};

use super::diesel_helpers::{DbFailure, bounded, collect_rows, pool_failure};
use super::models::{NewSavedJobRow, SavedJobRow};
use super::pool::DbPool;
use super::schema::saved_jobs;

/// Diesel-backed implementation of the `SavedJobRepository` port.
#[derive(Clone)]
pub struct DieselSavedJobRepository {
    pool: DbPool,
}

impl DieselSavedJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> SavedJobRepositoryError {
    match failure {
        // The composite primary key is the only unique constraint.
        DbFailure::UniqueViolation { .. } => SavedJobRepositoryError::duplicate(),
        DbFailure::Connection(message) => SavedJobRepositoryError::connection(message),
        DbFailure::Query(message) => SavedJobRepositoryError::query(message),
    }
}

#[async_trait]
impl SavedJobRepository for DieselSavedJobRepository {
    async fn insert(&self, saved: &SavedJob) -> Result<(), SavedJobRepositoryError> {
        let row = NewSavedJobRow::from(saved);
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        bounded(self.pool.query_timeout(), "insert saved job", async {
            diesel::insert_into(saved_jobs::table)
                .values(&row)
                .execute(&mut conn)
                .await
        })
        .await
        .map(|_| ())
        .map_err(map_failure)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<bool, SavedJobRepositoryError> {
        let user = user_id.as_ref().to_owned();
        let job = *job_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let deleted = bounded(self.pool.query_timeout(), "delete saved job", async {
            diesel::delete(saved_jobs::table.find((user, job)))
                .execute(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)?;

        Ok(deleted > 0)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedJob>, SavedJobRepositoryError> {
        let user = user_id.as_ref().to_owned();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<SavedJobRow> = bounded(self.pool.query_timeout(), "list saved jobs", async {
            saved_jobs::table
                .filter(saved_jobs::user_id.eq(user))
                .select(SavedJobRow::as_select())
                .order_by(saved_jobs::saved_at.desc())
                .load(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)?;

        collect_rows(
            rows.into_iter().map(SavedJob::try_from),
            SavedJobRepositoryError::query,
        )
    }

    async fn exists(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<bool, SavedJobRepositoryError> {
        let user = user_id.as_ref().to_owned();
        let job = *job_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        bounded(self.pool.query_timeout(), "check saved job", async {
            diesel::select(diesel::dsl::exists(saved_jobs::table.find((user, job))))
                .get_result::<bool>(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("saved_jobs_pkey"))]
    #[case(None)]
    fn unique_violations_are_duplicates(#[case] constraint: Option<&str>) {
        let failure = DbFailure::UniqueViolation {
            constraint: constraint.map(str::to_owned),
        };
        assert_eq!(map_failure(failure), SavedJobRepositoryError::Duplicate);
    }

    #[rstest]
    fn timeouts_are_connection_errors() {
        let failure = DbFailure::Connection("list saved jobs timed out".to_owned());
        assert!(matches!(
            map_failure(failure),
            SavedJobRepositoryError::Connection { .. }
        ));
    }
}
