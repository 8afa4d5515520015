//! SQLite storage bootstrap and connection scoping.
//!
//! # Responsibility
//! - Own the database location and open one connection per logical operation.
//! - Apply idempotent schema definitions and seed batches.
//!
//! # Invariants
//! - No connection outlives the operation that opened it.
//! - Schema statements use `CREATE ... IF NOT EXISTS`; seed statements use
//!   `INSERT OR IGNORE`, so bootstrapping is safe on every process start.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod connection;
pub mod schema;

pub use connection::Database;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The database file could not be opened.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Returns whether this error is a UNIQUE constraint violation raised by
    /// the store.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "failed to open database `{}`: {source}", path.display())
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
