//! Per-operation connection scoping for SQLite.
//!
//! # Responsibility
//! - Open a configured connection for exactly one statement or transaction.
//! - Release the connection on every exit path, including failures.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - A transaction that is not committed is rolled back when dropped.

use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the backing SQLite file.
///
/// Cloning is cheap: the handle only stores the location. Connections are
/// opened lazily by [`Database::with_connection`] and
/// [`Database::with_transaction`] and closed before they return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh configured connection.
    ///
    /// Most callers should prefer [`Database::with_connection`], which scopes
    /// the connection to one closure call.
    pub fn connect(&self) -> DbResult<Connection> {
        let started_at = Instant::now();

        let conn = Connection::open(&self.path).map_err(|source| {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            DbError::Open {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Err(err) = configure_connection(&conn) {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_configure_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        debug!(
            "event=db_open module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(conn)
    }

    /// Runs `op` against a connection that is dropped as soon as `op` returns.
    pub fn with_connection<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.connect()?;
        op(&conn)
    }

    /// Runs `op` inside one transaction on a scoped connection.
    ///
    /// The transaction commits only when `op` succeeds; any error (or panic)
    /// drops it uncommitted, which rolls it back.
    pub fn with_transaction<T, E>(
        &self,
        op: impl FnOnce(&Transaction<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(DbError::from)?;
        let value = op(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }

    /// Executes idempotent schema-definition statements.
    ///
    /// `ddl` may hold several `;`-separated statements; each one must use
    /// `IF NOT EXISTS` semantics so this is safe on every process start.
    pub fn create_table(&self, ddl: &str) -> DbResult<()> {
        self.with_connection(|conn| conn.execute_batch(ddl).map_err(DbError::from))?;
        info!("event=schema_ensure module=db status=ok");
        Ok(())
    }

    /// Executes a batch of seed inserts atomically.
    ///
    /// Either every statement is applied or none is. Statements are expected
    /// to be `INSERT OR IGNORE`, so re-running a batch neither duplicates nor
    /// fails on existing rows. Returns the number of rows actually inserted.
    pub fn insert_multiple_with_transaction(&self, statements: &[&str]) -> DbResult<usize> {
        let started_at = Instant::now();
        let result = self.with_transaction(|tx| {
            let mut inserted = 0;
            for statement in statements {
                inserted += tx.execute(statement, [])?;
            }
            Ok::<_, DbError>(inserted)
        });

        match &result {
            Ok(inserted) => info!(
                "event=seed_insert module=db status=ok statements={} inserted={} duration_ms={}",
                statements.len(),
                inserted,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=seed_insert module=db status=error statements={} duration_ms={} error={}",
                statements.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
