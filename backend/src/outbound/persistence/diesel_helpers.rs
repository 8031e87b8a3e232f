//! Shared helpers for the Diesel repository implementations.
//!
//! Repositories classify Diesel and pool failures into [`DbFailure`] and then
//! map that onto their own port error. Every call runs under the pool's
//! query timeout via [`bounded`].

use std::future::Future;
use std::time::Duration;

use diesel::QueryResult;
use tracing::debug;

use super::pool::PoolError;

/// Storage failure in adapter-neutral terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    /// Pool checkout failed, the connection closed or the call timed out.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// Anything else the database or Diesel rejected.
    Query(String),
}

impl DbFailure {
    /// Whether the failure is a unique violation on `constraint`.
    pub(crate) fn is_unique_violation_of(&self, constraint: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(name) } if name == constraint
        )
    }
}

/// Classify a pool error.
pub(crate) fn pool_failure(error: PoolError) -> DbFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DbFailure::Connection(message)
        }
    }
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn diesel_failure(error: diesel::result::Error, operation: &str) -> DbFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DbFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => DbFailure::Query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DbFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(_, _) => DbFailure::Query("database error".to_owned()),
        _ => DbFailure::Query("database error".to_owned()),
    }
}

/// Run `query` under `limit`, classifying both timeouts and Diesel errors.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &str, query: F) -> Result<T, DbFailure>
where
    F: Future<Output = QueryResult<T>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(|error| diesel_failure(error, operation)),
        Err(_) => {
            debug!(%operation, ?limit, "database call timed out");
            Err(DbFailure::Connection(format!("{operation} timed out")))
        }
    }
}

/// Escape `%`, `_` and `\` so `raw` matches literally inside `LIKE`.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `%raw%` with `raw` escaped for `LIKE`/`ILIKE`.
pub(crate) fn contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub(crate) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
