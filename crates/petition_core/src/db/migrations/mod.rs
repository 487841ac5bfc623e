//! Ordered schema migrations for the petition database.
//!
//! # Invariants
//! - Versions start at 1 and increase by one per entry.
//! - Everything pending applies in a single IMMEDIATE transaction, bumping
//!   `PRAGMA user_version` after each step.

use crate::db::{schema_version, DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// `(version, sql)` pairs in application order.
const STEPS: &[(u32, &str)] = &[
    (1, include_str!("0001_init.sql")),
    (2, include_str!("0002_listing_indexes.sql")),
];

/// Latest schema version this build can produce.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `Sqlite` when a step fails; nothing from the batch is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let to = latest_version();
    if schema_version(conn)? == to {
        return Ok(());
    }

    // Re-read under the write lock; another connection may have migrated.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let from = schema_version(&tx)?;
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<&(u32, &str)> = STEPS.iter().filter(|(version, _)| *version > from).collect();
    if pending.is_empty() {
        return Ok(());
    }

    for (version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{latest_version, STEPS};

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, (version, _)) in STEPS.iter().enumerate() {
            assert_eq!(*version as usize, index + 1);
        }
        assert_eq!(latest_version(), STEPS.len() as u32);
    }
}
