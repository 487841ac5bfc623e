//! Core domain logic for petition tracking.
//! This crate is the single source of truth for petition invariants.

pub mod auth;
pub mod cancel;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use auth::guard::{AuthError, AuthResult, AuthorizedPetitions};
pub use auth::policy::{authorize, Action, PolicyError, Principal};
pub use cancel::CancellationToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::petition::{
    CreatePetitionRequest, Petition, PetitionDraft, PetitionId, PetitionStatus, PetitionUpdate,
    PetitionValidationError, TargetLevel,
};
pub use query::filter::{PetitionFilter, PetitionPage};
pub use repo::memory_repo::InMemoryPetitionRepository;
pub use repo::petition_repo::{PetitionRepository, RepoError, RepoResult};
pub use repo::sqlite_repo::SqlitePetitionRepository;
pub use service::petition_service::{PetitionService, PetitionServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
