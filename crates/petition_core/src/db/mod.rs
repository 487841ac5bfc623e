//! SQLite bootstrap for the petition store.
//!
//! # Responsibility
//! - Open connections with petition pragmas and a migrated schema.
//! - Report the schema version a connection carries.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - Petition rows are only touched on connections at `latest_version()`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

use migrations::latest_version;
use rusqlite::Connection;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection was handed over without running migrations.
    NotMigrated { db_version: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "petition schema v{db_version} comes from a newer build (this build knows up to v{latest_supported})"
            ),
            Self::NotMigrated {
                db_version,
                expected,
            } => write!(
                f,
                "petition schema is at v{db_version}, expected v{expected}; open it through open_db"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Fails unless `conn` is exactly at the latest schema version.
pub fn ensure_schema_current(conn: &Connection) -> DbResult<()> {
    let db_version = schema_version(conn)?;
    let expected = latest_version();
    if db_version > expected {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: expected,
        });
    }
    if db_version < expected {
        return Err(DbError::NotMigrated {
            db_version,
            expected,
        });
    }
    Ok(())
}
