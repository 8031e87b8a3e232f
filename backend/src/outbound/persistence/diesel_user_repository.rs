//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Unique violations are told apart by constraint name: the primary key
//! means the profile already exists, `users_email_key` means another
//! profile holds the email address.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{UserId, UserProfile};

use super::diesel_helpers::{DbFailure, bounded, collect_rows, pool_failure};
use super::models::{UserRecord, UserRow};
use super::pool::DbPool;
use super::schema::users;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const PRIMARY_KEY_CONSTRAINT: &str = "users_pkey";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> UserRepositoryError {
    match failure {
        failure if failure.is_unique_violation_of(EMAIL_CONSTRAINT) => {
            UserRepositoryError::email_taken()
        }
        failure if failure.is_unique_violation_of(PRIMARY_KEY_CONSTRAINT) => {
            UserRepositoryError::already_exists()
        }
        DbFailure::UniqueViolation { constraint } => UserRepositoryError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
        DbFailure::Connection(message) => UserRepositoryError::connection(message),
        DbFailure::Query(message) => UserRepositoryError::query(message),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserRepositoryError> {
        let key = id.as_ref().to_owned();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let row: Option<UserRow> = bounded(self.pool.query_timeout(), "find user", async {
            users::table
                .find(key)
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
        })
        .await
        .map_err(map_failure)?;

        row.map(UserProfile::try_from)
            .transpose()
            .map_err(UserRepositoryError::query)
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let rows: Vec<UserRow> = bounded(self.pool.query_timeout(), "find users", async {
            users::table
                .filter(users::id.eq_any(keys))
                .select(UserRow::as_select())
                .load(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)?;

        collect_rows(
            rows.into_iter().map(UserProfile::try_from),
            UserRepositoryError::query,
        )
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), UserRepositoryError> {
        let record = UserRecord::from_profile(profile).map_err(UserRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        bounded(self.pool.query_timeout(), "insert user", async {
            diesel::insert_into(users::table)
                .values(&record)
                .execute(&mut conn)
                .await
        })
        .await
        .map(|_| ())
        .map_err(map_failure)
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), UserRepositoryError> {
        let record = UserRecord::from_profile(profile).map_err(UserRepositoryError::query)?;
        let key = profile.id.as_ref().to_owned();
        let mut conn = self.pool.get().await.map_err(pool_failure).map_err(map_failure)?;

        let updated = bounded(self.pool.query_timeout(), "update user", async {
            diesel::update(users::table.find(key))
                .set(&record)
                .execute(&mut conn)
                .await
        })
        .await
        .map_err(map_failure)?;

        if updated == 0 {
            return Err(UserRepositoryError::missing());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage.
    use super::*;
    use rstest::rstest;

    fn unique(constraint: &str) -> DbFailure {
        DbFailure::UniqueViolation {
            constraint: Some(constraint.to_owned()),
        }
    }

    #[rstest]
    #[case(unique(EMAIL_CONSTRAINT), UserRepositoryError::EmailTaken)]
    #[case(unique(PRIMARY_KEY_CONSTRAINT), UserRepositoryError::AlreadyExists)]
    #[case(
        DbFailure::Connection("pool exhausted".to_owned()),
        UserRepositoryError::connection("pool exhausted")
    )]
    fn failures_map_to_port_errors(
        #[case] failure: DbFailure,
        #[case] expected: UserRepositoryError,
    ) {
        assert_eq!(map_failure(failure), expected);
    }

    #[rstest]
    fn unnamed_unique_violations_are_query_errors() {
        let failure = DbFailure::UniqueViolation { constraint: None };
        assert!(matches!(
            map_failure(failure),
            UserRepositoryError::Query { .. }
        ));
    }
}
