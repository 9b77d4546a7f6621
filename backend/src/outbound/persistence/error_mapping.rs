//! Shared Diesel error classification for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse outcome of a failed Diesel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// Any other database or query-builder failure.
    Query(&'static str),
}

/// Log and classify a Diesel error.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DeserializationError(_) => DieselFailure::Query("row decoding error"),
        _ => DieselFailure::Query("database error"),
    }
}

/// Map a classified failure onto port constructors, treating unique
/// violations as ordinary query errors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: &DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => connection(message),
        DieselFailure::UniqueViolation => query("unique constraint violated"),
        DieselFailure::Query(message) => query(message),
    }
}

/// Saturating conversion of a page offset into the `BIGINT` Diesel expects.
pub(crate) fn to_sql_offset(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    fn map(error: &DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(map(&DieselError::NotFound), Mapped::Query("record not found"));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert_eq!(map(&error), Mapped::Connection("database connection error"));
    }

    #[rstest]
    fn unique_violation_is_classified() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value")),
        );
        assert_eq!(classify_diesel_error(&error), DieselFailure::UniqueViolation);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(20, 20)]
    #[case(u64::MAX, i64::MAX)]
    fn offsets_saturate(#[case] offset: u64, #[case] expected: i64) {
        assert_eq!(to_sql_offset(offset), expected);
    }
}
