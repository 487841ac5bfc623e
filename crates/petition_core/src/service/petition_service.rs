//! Petition use-case service.
//!
//! # Responsibility
//! - Provide the core contract: list/query, get, create, sign, update,
//!   delete, taxonomy, seeding.
//! - Own the signing state machine and status transition rules.
//!
//! # Invariants
//! - All writes go through the store's atomic primitives; the service never
//!   writes a record it read earlier without `modify`.
//! - A signature is only counted while the petition is `Active`.
//! - Failed validation never touches the store.

use crate::cancel::CancellationToken;
use crate::clock::{Clock, SystemClock};
use crate::model::petition::{
    CreatePetitionRequest, Petition, PetitionId, PetitionStatus, PetitionUpdate,
    PetitionValidationError,
};
use crate::query::filter::{query_page, PetitionFilter, PetitionPage};
use crate::query::taxonomy::{distinct_categories, distinct_themes};
use crate::repo::petition_repo::{PetitionRepository, RepoError, RepoResult};
use crate::service::seed::sample_petitions;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type ServiceResult<T> = Result<T, PetitionServiceError>;

/// Service error for petition use-cases.
#[derive(Debug)]
pub enum PetitionServiceError {
    /// Required fields missing or invalid.
    Validation(PetitionValidationError),
    /// No petition with this id.
    NotFound(PetitionId),
    /// Current status forbids the operation (e.g. signing a closed petition).
    InvalidState {
        id: PetitionId,
        status: PetitionStatus,
        operation: String,
    },
    /// Caller cancelled before the write committed; nothing changed.
    Cancelled,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for PetitionServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "petition not found: {id}"),
            Self::InvalidState {
                id,
                status,
                operation,
            } => write!(f, "petition {id} is {status}; cannot {operation}"),
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PetitionServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PetitionServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::InvalidState {
                id,
                status,
                operation,
            } => Self::InvalidState {
                id,
                status,
                operation,
            },
            RepoError::Cancelled => Self::Cancelled,
            other => Self::Repo(other),
        }
    }
}

impl From<PetitionValidationError> for PetitionServiceError {
    fn from(value: PetitionValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Petition service facade over a store implementation.
pub struct PetitionService<R: PetitionRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: PetitionRepository> PetitionService<R> {
    /// Creates a service stamping times from the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    /// Creates a service with an explicit time source.
    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Underlying store.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists one page of petitions matching `filter`, newest first.
    pub fn list_petitions(&self, filter: &PetitionFilter) -> ServiceResult<Vec<Petition>> {
        Ok(self.query_petitions(filter)?.items)
    }

    /// Like [`Self::list_petitions`] but returns the pagination envelope.
    pub fn query_petitions(&self, filter: &PetitionFilter) -> ServiceResult<PetitionPage> {
        self.query_petitions_cancellable(filter, &CancellationToken::new())
    }

    pub fn query_petitions_cancellable(
        &self,
        filter: &PetitionFilter,
        cancel: &CancellationToken,
    ) -> ServiceResult<PetitionPage> {
        ensure_live(cancel)?;
        let snapshot = self.repo.list_all()?;
        let page = query_page(snapshot, filter);
        debug!(
            "event=petition_query module=service status=ok page={} page_size={} total_matches={} returned={}",
            page.page,
            page.page_size,
            page.total_matches,
            page.items.len()
        );
        Ok(page)
    }

    /// Gets one petition by id.
    pub fn get_petition(&self, id: PetitionId) -> ServiceResult<Petition> {
        self.get_petition_cancellable(id, &CancellationToken::new())
    }

    pub fn get_petition_cancellable(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
    ) -> ServiceResult<Petition> {
        ensure_live(cancel)?;
        self.repo
            .get(id)?
            .ok_or(PetitionServiceError::NotFound(id))
    }

    /// Creates an `Active` petition carrying the creator's signature.
    pub fn create_petition(&self, request: CreatePetitionRequest) -> ServiceResult<Petition> {
        self.create_petition_cancellable(request, &CancellationToken::new())
    }

    pub fn create_petition_cancellable(
        &self,
        request: CreatePetitionRequest,
        cancel: &CancellationToken,
    ) -> ServiceResult<Petition> {
        if let Err(err) = request.validate() {
            warn!("event=petition_create module=service status=rejected reason={err}");
            return Err(err.into());
        }

        let draft = request.into_draft(self.clock.now_ms());
        let petition = self.repo.insert(&draft, cancel)?;
        info!(
            "event=petition_create module=service status=ok petition_id={}",
            petition.id
        );
        Ok(petition)
    }

    /// Adds one signature to an `Active` petition.
    ///
    /// # Errors
    /// - `NotFound` for unknown ids.
    /// - `InvalidState` when the petition is not `Active`; the count is
    ///   left untouched.
    pub fn sign_petition(&self, id: PetitionId) -> ServiceResult<Petition> {
        self.sign_petition_cancellable(id, &CancellationToken::new())
    }

    pub fn sign_petition_cancellable(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
    ) -> ServiceResult<Petition> {
        let clock = &self.clock;
        let mut sign = |petition: &mut Petition| -> RepoResult<()> {
            if !petition.status.is_signable() {
                return Err(RepoError::InvalidState {
                    id: petition.id,
                    status: petition.status,
                    operation: "accept signatures".to_string(),
                });
            }
            petition.signature_count = petition.signature_count.checked_add(1).ok_or_else(|| {
                RepoError::InvalidData(format!("signature count overflow for petition {id}"))
            })?;
            petition.last_updated = clock.now_ms();
            Ok(())
        };

        match self.repo.modify(id, cancel, &mut sign) {
            Ok(petition) => {
                debug!(
                    "event=petition_sign module=service status=ok petition_id={id} signature_count={}",
                    petition.signature_count
                );
                Ok(petition)
            }
            Err(err) => {
                warn!("event=petition_sign module=service status=rejected petition_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Replaces the provided fields of one petition.
    ///
    /// An empty update returns the current record unchanged.
    pub fn update_petition(
        &self,
        id: PetitionId,
        update: &PetitionUpdate,
    ) -> ServiceResult<Petition> {
        self.update_petition_cancellable(id, update, &CancellationToken::new())
    }

    pub fn update_petition_cancellable(
        &self,
        id: PetitionId,
        update: &PetitionUpdate,
        cancel: &CancellationToken,
    ) -> ServiceResult<Petition> {
        update.validate()?;
        if update.is_empty() {
            return self.get_petition(id);
        }

        let clock = &self.clock;
        let mut apply = |petition: &mut Petition| -> RepoResult<()> {
            if let Some(next) = update.status {
                if !petition.status.can_transition_to(next) {
                    return Err(RepoError::InvalidState {
                        id: petition.id,
                        status: petition.status,
                        operation: format!("move to {next}"),
                    });
                }
                petition.status = next;
            }
            update.apply_fields(petition);
            petition.last_updated = clock.now_ms();
            Ok(())
        };

        let petition = self.repo.modify(id, cancel, &mut apply)?;
        info!(
            "event=petition_update module=service status=ok petition_id={id} petition_status={}",
            petition.status.as_str()
        );
        Ok(petition)
    }

    /// Moves a petition to `status`, following the transition rules.
    pub fn set_status(&self, id: PetitionId, status: PetitionStatus) -> ServiceResult<Petition> {
        self.update_petition(
            id,
            &PetitionUpdate {
                status: Some(status),
                ..PetitionUpdate::default()
            },
        )
    }

    /// Deletes one petition.
    pub fn delete_petition(&self, id: PetitionId) -> ServiceResult<()> {
        self.delete_petition_cancellable(id, &CancellationToken::new())
    }

    pub fn delete_petition_cancellable(
        &self,
        id: PetitionId,
        cancel: &CancellationToken,
    ) -> ServiceResult<()> {
        self.repo.delete(id, cancel)?;
        info!("event=petition_delete module=service status=ok petition_id={id}");
        Ok(())
    }

    /// Distinct categories in use, ascending.
    pub fn list_categories(&self) -> ServiceResult<Vec<String>> {
        self.list_categories_cancellable(&CancellationToken::new())
    }

    pub fn list_categories_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> ServiceResult<Vec<String>> {
        ensure_live(cancel)?;
        Ok(distinct_categories(&self.repo.list_all()?))
    }

    /// Distinct themes in use, ascending.
    pub fn list_themes(&self) -> ServiceResult<Vec<String>> {
        self.list_themes_cancellable(&CancellationToken::new())
    }

    pub fn list_themes_cancellable(&self, cancel: &CancellationToken) -> ServiceResult<Vec<String>> {
        ensure_live(cancel)?;
        Ok(distinct_themes(&self.repo.list_all()?))
    }

    /// Inserts the sample petitions when the store is empty.
    ///
    /// Returns the inserted petitions; a non-empty store is left alone and
    /// yields an empty list. The emptiness check and the inserts are one
    /// store operation, so concurrent seeders insert at most one batch.
    pub fn seed_sample_petitions(&self) -> ServiceResult<Vec<Petition>> {
        let drafts = sample_petitions(self.clock.now_ms());
        let inserted = self
            .repo
            .insert_all_if_empty(&drafts, &CancellationToken::new())?;
        if inserted.is_empty() {
            info!("event=petition_seed module=service status=skipped reason=store_not_empty");
        } else {
            info!(
                "event=petition_seed module=service status=ok inserted={}",
                inserted.len()
            );
        }
        Ok(inserted)
    }
}

fn ensure_live(cancel: &CancellationToken) -> ServiceResult<()> {
    if cancel.is_cancelled() {
        return Err(PetitionServiceError::Cancelled);
    }
    Ok(())
}
