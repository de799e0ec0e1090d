//! Shared Diesel error mapping for the product and order repositories.
//!
//! Both repositories expose `Connection` and `Query` error variants; these
//! helpers route pool and Diesel failures to the right constructor.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure to a repository connection error.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.to_string())
}

/// Map a Diesel failure to a repository query or connection error.
///
/// `NotFound` is included for completeness; lookups use `.optional()` so an
/// absent row normally never reaches this function.
pub(super) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(format!("database connection error: {}", info.message()))
        }
        DieselError::DatabaseError(_, info) => query(format!("database error: {}", info.message())),
        DieselError::NotFound => query("record not found".to_owned()),
        other => query(other.to_string()),
    }
}
