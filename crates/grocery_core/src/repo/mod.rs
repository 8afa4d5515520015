//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity CRUD contracts.
//! - Keep SQL text, parameter binding and column decoding inside this layer.
//!
//! # Invariants
//! - Repositories hold no cached rows; every read queries the store.
//! - A missing target row is `Ok(None)`, never an error.
//! - Store errors are propagated unchanged inside [`RepoError::Db`].

use crate::db::DbError;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod grocery_list_item_repo;
pub mod product_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A value could not be converted between its domain and column form.
    InvalidData(String),
    /// The price would not read back unchanged from its REAL column.
    UnstorablePrice(Decimal),
}

impl RepoError {
    /// Returns whether the store rejected a write on a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_unique_violation())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UnstorablePrice(price) => {
                write!(f, "price `{price}` has more precision than the store keeps")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::UnstorablePrice(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
