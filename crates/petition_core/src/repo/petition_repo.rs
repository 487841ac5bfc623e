//! Petition store contract and shared error type.
//!
//! # Responsibility
//! - Declare the capability set every backend provides: insert, get, list,
//!   atomic modify, delete, atomic bulk seeding.
//! - Enforce record invariants that no backend may bypass.
//!
//! # Invariants
//! - `modify` never lets a mutation change `id` or `created_at`.
//! - Persisted petitions always pass `check_record`.

use crate::cancel::CancellationToken;
use crate::db::DbError;
use crate::model::petition::{
    Petition, PetitionDraft, PetitionId, PetitionStatus, PetitionValidationError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for petition persistence and mutation.
#[derive(Debug)]
pub enum RepoError {
    Validation(PetitionValidationError),
    Db(DbError),
    NotFound(PetitionId),
    /// The record's current status forbids the requested operation.
    InvalidState {
        id: PetitionId,
        status: PetitionStatus,
        operation: String,
    },
    InvalidData(String),
    Cancelled,
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "petition not found: {id}"),
            Self::InvalidState {
                id,
                status,
                operation,
            } => write!(f, "petition {id} is {status}; cannot {operation}"),
            Self::InvalidData(message) => write!(f, "invalid petition data: {message}"),
            Self::Cancelled => write!(f, "operation cancelled before commit"),
            Self::LockPoisoned => write!(f, "petition store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PetitionValidationError> for RepoError {
    fn from(value: PetitionValidationError) -> Self {
        Self::Validation(value)
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

/// Read-modify-write callback passed to [`PetitionRepository::modify`].
///
/// Returning an error aborts the write; the stored record stays unchanged.
pub type Mutation<'a> = &'a mut dyn FnMut(&mut Petition) -> RepoResult<()>;

/// Storage contract shared by the in-memory and SQLite backends.
pub trait PetitionRepository: Send + Sync {
    /// Stores a new petition and returns it with its assigned id.
    fn insert(&self, draft: &PetitionDraft, cancel: &CancellationToken) -> RepoResult<Petition>;
    /// Gets one petition; `None` when the id is unknown.
    fn get(&self, id: PetitionId) -> RepoResult<Option<Petition>>;
    /// Snapshot of every petition in insertion (ascending id) order.
    fn list_all(&self) -> RepoResult<Vec<Petition>>;
    /// Atomically applies `mutate` to one record and returns the new state.
    fn modify(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
        mutate: Mutation<'_>,
    ) -> RepoResult<Petition>;
    /// Removes one petition.
    fn delete(&self, id: PetitionId, cancel: &CancellationToken) -> RepoResult<()>;
    /// Inserts every draft in one atomic step, but only while the store holds
    /// no petitions. Returns the stored petitions, or an empty list when the
    /// store was not empty.
    fn insert_all_if_empty(
        &self,
        drafts: &[PetitionDraft],
        cancel: &CancellationToken,
    ) -> RepoResult<Vec<Petition>>;
}

impl<R: PetitionRepository + ?Sized> PetitionRepository for Arc<R> {
    fn insert(&self, draft: &PetitionDraft, cancel: &CancellationToken) -> RepoResult<Petition> {
        (**self).insert(draft, cancel)
    }

    fn get(&self, id: PetitionId) -> RepoResult<Option<Petition>> {
        (**self).get(id)
    }

    fn list_all(&self) -> RepoResult<Vec<Petition>> {
        (**self).list_all()
    }

    fn modify(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
        mutate: Mutation<'_>,
    ) -> RepoResult<Petition> {
        (**self).modify(id, cancel, mutate)
    }

    fn delete(&self, id: PetitionId, cancel: &CancellationToken) -> RepoResult<()> {
        (**self).delete(id, cancel)
    }

    fn insert_all_if_empty(
        &self,
        drafts: &[PetitionDraft],
        cancel: &CancellationToken,
    ) -> RepoResult<Vec<Petition>> {
        (**self).insert_all_if_empty(drafts, cancel)
    }
}

impl<R: PetitionRepository + ?Sized> PetitionRepository for Box<R> {
    fn insert(&self, draft: &PetitionDraft, cancel: &CancellationToken) -> RepoResult<Petition> {
        (**self).insert(draft, cancel)
    }

    fn get(&self, id: PetitionId) -> RepoResult<Option<Petition>> {
        (**self).get(id)
    }

    fn list_all(&self) -> RepoResult<Vec<Petition>> {
        (**self).list_all()
    }

    fn modify(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
        mutate: Mutation<'_>,
    ) -> RepoResult<Petition> {
        (**self).modify(id, cancel, mutate)
    }

    fn delete(&self, id: PetitionId, cancel: &CancellationToken) -> RepoResult<()> {
        (**self).delete(id, cancel)
    }

    fn insert_all_if_empty(
        &self,
        drafts: &[PetitionDraft],
        cancel: &CancellationToken,
    ) -> RepoResult<Vec<Petition>> {
        (**self).insert_all_if_empty(drafts, cancel)
    }
}

/// Validates a full record before it is persisted.
pub(crate) fn check_record(petition: &Petition) -> RepoResult<()> {
    petition.validate()?;
    Ok(())
}

/// Rejects mutations that touched immutable fields, then validates the result.
pub(crate) fn check_mutation(before: &Petition, after: &Petition) -> RepoResult<()> {
    if before.id != after.id {
        return Err(RepoError::InvalidData(format!(
            "mutation changed petition id {} to {}",
            before.id, after.id
        )));
    }
    if before.created_at != after.created_at {
        return Err(RepoError::InvalidData(format!(
            "mutation changed created_at of petition {}",
            before.id
        )));
    }
    check_record(after)
}

/// Returns `Cancelled` when the caller has given up on the operation.
pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> RepoResult<()> {
    if cancel.is_cancelled() {
        return Err(RepoError::Cancelled);
    }
    Ok(())
}
