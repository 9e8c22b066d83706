//! Translation of pool, Diesel and deadline failures into [`RepositoryError`].

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Pool failures always surface as connection errors.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    RepositoryError::connection(error.message())
}

/// Map a Diesel error, keeping unique violations apart as conflicts.
pub fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::not_found(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::conflict(info.constraint_name().unwrap_or("unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

/// An owner-filtered update or delete must touch exactly one row; zero means
/// the id is absent or belongs to someone else.
pub fn exactly_one_row(affected: usize) -> Result<(), RepositoryError> {
    if affected == 0 {
        Err(RepositoryError::not_found())
    } else {
        Ok(())
    }
}

/// Run `operation` under the storage time budget.
///
/// Elapsing the budget yields [`RepositoryError::Timeout`], never a query
/// error, so callers can tell a slow store from a broken statement.
pub async fn within<T, F>(
    budget: Duration,
    operation: &'static str,
    work: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    if let Ok(result) = tokio::time::timeout(budget, work).await {
        result
    } else {
        warn!(operation, budget_ms = budget.as_millis() as u64, "storage deadline elapsed");
        Err(RepositoryError::timeout(operation))
    }
}
