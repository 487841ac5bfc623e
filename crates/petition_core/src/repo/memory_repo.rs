//! In-process petition store.
//!
//! # Invariants
//! - One coarse lock guards the table and the id counter, so every
//!   operation is linearizable.
//! - Rows are keyed by id in a `BTreeMap`; iteration order is insertion order.

use crate::cancel::CancellationToken;
use crate::model::petition::{Petition, PetitionDraft, PetitionId};
use crate::repo::petition_repo::{
    check_mutation, ensure_not_cancelled, Mutation, PetitionRepository, RepoError, RepoResult,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct MemoryState {
    next_id: PetitionId,
    rows: BTreeMap<PetitionId, Petition>,
}

/// Petition store held entirely in memory. Nothing survives the process.
#[derive(Debug)]
pub struct InMemoryPetitionRepository {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryPetitionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPetitionRepository {
    /// Creates an empty store whose first assigned id is `1`.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored petitions.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.rows.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl PetitionRepository for InMemoryPetitionRepository {
    fn insert(&self, draft: &PetitionDraft, cancel: &CancellationToken) -> RepoResult<Petition> {
        draft.validate()?;

        let mut state = self.lock()?;
        ensure_not_cancelled(cancel)?;
        let id = state.next_id;
        state.next_id += 1;
        let petition = draft.clone().into_petition(id);
        state.rows.insert(id, petition.clone());
        Ok(petition)
    }

    fn get(&self, id: PetitionId) -> RepoResult<Option<Petition>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    fn list_all(&self) -> RepoResult<Vec<Petition>> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    fn modify(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
        mutate: Mutation<'_>,
    ) -> RepoResult<Petition> {
        let mut state = self.lock()?;
        let current = state.rows.get(&id).ok_or(RepoError::NotFound(id))?;

        let mut next = current.clone();
        mutate(&mut next)?;
        check_mutation(current, &next)?;
        ensure_not_cancelled(cancel)?;

        state.rows.insert(id, next.clone());
        Ok(next)
    }

    fn delete(&self, id: PetitionId, cancel: &CancellationToken) -> RepoResult<()> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&id) {
            return Err(RepoError::NotFound(id));
        }
        ensure_not_cancelled(cancel)?;
        state.rows.remove(&id);
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

        let mut state = self.lock()?;
        if !state.rows.is_empty() {
            return Ok(Vec::new());
        }
        ensure_not_cancelled(cancel)?;

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = state.next_id;
            state.next_id += 1;
            let petition = draft.clone().into_petition(id);
            state.rows.insert(id, petition.clone());
            inserted.push(petition);
        }
        Ok(inserted)
    }
}
