//! Translates driver failures into repository error constructors.

use tracing::debug;

use super::pool::PoolError;

/// Pool failures always surface as connection errors.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.to_string())
}

/// Classify a Diesel failure as a lost connection or a failed query.
///
/// Driver detail is logged at debug level; only a coarse description
/// reaches the domain so storage internals stay out of API responses.
pub(crate) fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection lost");
            connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "database operation failed");
            query("database error")
        }
        DieselError::NotFound => query("record not found"),
        other => {
            debug!(error = %other, "database operation failed");
            query("database error")
        }
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"), Mapped::Connection);
        match mapped {
            Mapped::Connection(message) => assert!(message.contains("connection refused")),
            Mapped::Query(_) => panic!("expected a connection error"),
        }
    }

    #[rstest]
    fn closed_connections_become_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        let mapped = map_diesel_error(error, Mapped::Query, |m| Mapped::Connection(m.to_owned()));
        assert_eq!(
            mapped,
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ),
        "database error"
    )]
    fn other_failures_become_query_errors(
        #[case] error: DieselError,
        #[case] expected: &'static str,
    ) {
        let mapped = map_diesel_error(error, Mapped::Query, |m| Mapped::Connection(m.to_owned()));
        assert_eq!(mapped, Mapped::Query(expected));
    }
}
