//! # Database Errors
//!
//! Error types for the connection provider and the store.

use thiserror::Error;

/// Result type for store operations
pub type DbResult<T> = Result<T, DbError>;

/// Database errors
#[derive(Debug, Error)]
pub enum DbError {
    // ==================
    // Configuration
    // ==================
    /// No connection string supplied
    #[error("DATABASE_URL is not configured")]
    MissingUrl,

    /// Connection string could not be parsed
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    // ==================
    // Statement Errors
    // ==================
    /// The store refused a write (constraint or foreign-key violation).
    ///
    /// Carries the store's primary diagnostic message verbatim.
    #[error("{0}")]
    Rejected(String),

    // ==================
    // Connection Errors
    // ==================
    /// Acquiring or using the connection failed
    #[error("Connection fault: {0}")]
    Connection(#[source] sqlx::Error),
}

impl DbError {
    /// Classify an error raised by a write statement.
    ///
    /// Errors reported by the server itself become `Rejected`, everything
    /// else (I/O, pool, protocol) stays a connection fault.
    pub fn from_write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::Rejected(db_err.message().to_string()),
            other => DbError::Connection(other),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Connection(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_connection_faults() {
        let err = DbError::from_write(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Connection(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn test_rejected_displays_store_message_verbatim() {
        let err = DbError::Rejected("violates foreign key constraint".to_string());
        assert_eq!(err.to_string(), "violates foreign key constraint");
    }

    #[test]
    fn test_from_sqlx_is_connection_fault() {
        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::Connection(_)));
    }
}
