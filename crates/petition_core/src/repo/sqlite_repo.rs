//! SQLite-backed petition store.
//!
//! # Responsibility
//! - Persist petitions in the `petitions` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The connection sits behind a mutex; each write runs in its own
//!   IMMEDIATE transaction, so `modify` is serialized per record.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::cancel::CancellationToken;
use crate::db::{ensure_schema_current, open_db, open_db_in_memory};
use crate::model::petition::{Petition, PetitionDraft, PetitionId, PetitionStatus};
use crate::repo::petition_repo::{
    check_mutation, ensure_not_cancelled, Mutation, PetitionRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const PETITION_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category,
    theme,
    created_by,
    target_level,
    status,
    signature_count,
    created_at,
    last_updated
FROM petitions";

/// Petition store over one migrated SQLite connection.
pub struct SqlitePetitionRepository {
    conn: Mutex<Connection>,
}

impl SqlitePetitionRepository {
    /// Wraps a connection after checking its schema is fully migrated.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_schema_current(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (or creates) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database and wraps it.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl PetitionRepository for SqlitePetitionRepository {
    fn insert(&self, draft: &PetitionDraft, cancel: &CancellationToken) -> RepoResult<Petition> {
        draft.validate()?;

        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = insert_row(&tx, draft)?;

        ensure_not_cancelled(cancel)?;
        tx.commit()?;
        Ok(draft.clone().into_petition(id))
    }

    fn get(&self, id: PetitionId) -> RepoResult<Option<Petition>> {
        let conn = self.lock()?;
        select_petition(&conn, id)
    }

    fn list_all(&self) -> RepoResult<Vec<Petition>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{PETITION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut petitions = Vec::new();
        while let Some(row) = rows.next()? {
            petitions.push(parse_petition_row(row)?);
        }
        Ok(petitions)
    }

    fn modify(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
        mutate: Mutation<'_>,
    ) -> RepoResult<Petition> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let current = select_petition(&tx, id)?.ok_or(RepoError::NotFound(id))?;

        let mut next = current.clone();
        mutate(&mut next)?;
        check_mutation(&current, &next)?;

        tx.execute(
            "UPDATE petitions
             SET
                title = ?2,
                description = ?3,
                category = ?4,
                theme = ?5,
                created_by = ?6,
                target_level = ?7,
                status = ?8,
                signature_count = ?9,
                last_updated = ?10
             WHERE id = ?1;",
            params![
                id,
                next.title.as_str(),
                next.description.as_str(),
                next.category.as_str(),
                next.theme.as_str(),
                next.created_by.as_str(),
                next.target_level.as_str(),
                next.status.as_str(),
                count_to_db(next.signature_count)?,
                next.last_updated,
            ],
        )?;

        ensure_not_cancelled(cancel)?;
        tx.commit()?;
        Ok(next)
    }

    fn delete(&self, id: PetitionId, cancel: &CancellationToken) -> RepoResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM petitions WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        ensure_not_cancelled(cancel)?;
        tx.commit()?;
        Ok(())
    }

    fn insert_all_if_empty(
        &self,
        drafts: &[PetitionDraft],
        cancel: &CancellationToken,
    ) -> RepoResult<Vec<Petition>> {
        for draft in drafts {
            draft.validate()?;
        }

        let mut conn = self.lock()?;
        // Write lock is held from the emptiness check through commit.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let has_rows: bool =
            tx.query_row("SELECT EXISTS(SELECT 1 FROM petitions);", [], |row| row.get(0))?;
        if has_rows {
            return Ok(Vec::new());
        }

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = insert_row(&tx, draft)?;
            inserted.push(draft.clone().into_petition(id));
        }

        ensure_not_cancelled(cancel)?;
        tx.commit()?;
        Ok(inserted)
    }
}

fn insert_row(conn: &Connection, draft: &PetitionDraft) -> RepoResult<PetitionId> {
    conn.execute(
        "INSERT INTO petitions (
            title,
            description,
            category,
            theme,
            created_by,
            target_level,
            status,
            signature_count,
            created_at,
            last_updated
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            draft.title.as_str(),
            draft.description.as_str(),
            draft.category.as_str(),
            draft.theme.as_str(),
            draft.created_by.as_str(),
            draft.target_level.as_str(),
            draft.status.as_str(),
            count_to_db(draft.signature_count)?,
            draft.created_at,
            draft.last_updated,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn select_petition(conn: &Connection, id: PetitionId) -> RepoResult<Option<Petition>> {
    let mut stmt = conn.prepare(&format!("{PETITION_SELECT_SQL} WHERE id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_petition_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_petition_row(row: &Row<'_>) -> RepoResult<Petition> {
    let id: PetitionId = row.get("id")?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in petitions.status for id {id}"
        ))
    })?;

    let raw_count: i64 = row.get("signature_count")?;
    let signature_count = u64::try_from(raw_count).map_err(|_| {
        RepoError::InvalidData(format!(
            "negative signature_count `{raw_count}` for id {id}"
        ))
    })?;

    let petition = Petition {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        theme: row.get("theme")?,
        created_by: row.get("created_by")?,
        target_level: row.get("target_level")?,
        status,
        signature_count,
        created_at: row.get("created_at")?,
        last_updated: row.get("last_updated")?,
    };
    petition.validate()?;
    Ok(petition)
}

fn parse_status(value: &str) -> Option<PetitionStatus> {
    match value {
        "active" => Some(PetitionStatus::Active),
        "under_review" => Some(PetitionStatus::UnderReview),
        "closed" => Some(PetitionStatus::Closed),
        _ => None,
    }
}

fn count_to_db(count: u64) -> RepoResult<i64> {
    i64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("signature count {count} out of range")))
}

#[cfg(test)]
mod tests {
    use super::{parse_status, SqlitePetitionRepository};
    use crate::db::DbError;
    use crate::model::petition::PetitionStatus;
    use crate::repo::petition_repo::RepoError;
    use rusqlite::Connection;

    #[test]
    fn parse_status_round_trips_storage_values() {
        for status in [
            PetitionStatus::Active,
            PetitionStatus::UnderReview,
            PetitionStatus::Closed,
        ] {
            assert_eq!(parse_status(status.as_str()), Some(status));
        }
        assert_eq!(parse_status("Active"), None);
    }

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqlitePetitionRepository::try_new(conn)
            .err()
            .expect("unmigrated connection must be rejected");
        assert!(matches!(
            err,
            RepoError::Db(DbError::NotMigrated { db_version: 0, .. })
        ));
    }
}
