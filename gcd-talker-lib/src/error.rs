use gcd_talker_db::{QueryError, SchemaError};
use gcd_talker_scraper::ScrapeError;
use thiserror::Error;

use crate::cache::CacheError;

/// Errors surfaced by the talker operations.
///
/// Missing records are not errors; lookups return `None` instead.
#[derive(Debug, Error)]
pub enum TalkerError {
    /// The database file could not be located or opened
    #[error("{0}")]
    Database(#[from] SchemaError),

    /// A query against the dump failed
    #[error("DB error: {0}")]
    Query(#[from] QueryError),

    /// Result cache failure
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Malformed caller input (blank search, non-numeric id, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A network request failed
    #[error("Network error: {0}")]
    Network(#[from] ScrapeError),
}

impl TalkerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Error code reported to the host.
    ///
    /// 0 unknown or database failure, 1 bad data in the dump, 2 invalid input,
    /// 3 database path problem, 4 network failure.
    pub fn code(&self) -> u8 {
        match self {
            TalkerError::Database(SchemaError::EmptyPath | SchemaError::Missing(_)) => 3,
            TalkerError::Database(SchemaError::Sqlite(e)) => sqlite_code(e),
            TalkerError::Query(QueryError::Sqlite(e)) => sqlite_code(e),
            TalkerError::Cache(_) => 0,
            TalkerError::InvalidInput(_) => 2,
            TalkerError::Network(_) => 4,
        }
    }
}

/// Conversion failures and constraint problems mean the data itself is bad.
fn sqlite_code(err: &rusqlite::Error) -> u8 {
    match err {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::Utf8Error(_) => 1,
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(
                e.code,
                rusqlite::ErrorCode::TypeMismatch
                    | rusqlite::ErrorCode::TooBig
                    | rusqlite::ErrorCode::ConstraintViolation
            ) =>
        {
            1
        }
        _ => 0,
    }
}
