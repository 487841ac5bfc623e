//! Command handlers for the `petition` binary.
//!
//! # Responsibility
//! - Resolve configuration, logging and the store for one invocation.
//! - Map core errors to process exit codes.

pub mod petitions;
pub mod seed;
pub mod taxonomy;

use crate::cli::GlobalArgs;
use log::info;
use petition_core::{
    core_version, init_logging, AuthError, AuthorizedPetitions, CoreConfig,
    InMemoryPetitionRepository, PetitionRepository, PetitionService, PetitionServiceError,
    PolicyError, Principal, RepoError, SqlitePetitionRepository,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type Repo = Box<dyn PetitionRepository>;
pub type CliResult<T> = Result<T, CliError>;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NOT_FOUND: i32 = 2;
pub const EXIT_INVALID_STATE: i32 = 3;
pub const EXIT_VALIDATION: i32 = 4;
pub const EXIT_UNAUTHORIZED: i32 = 5;

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Store(RepoError),
    Auth(AuthError),
    Output(serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Auth(AuthError::Denied(_)) => EXIT_UNAUTHORIZED,
            Self::Auth(AuthError::Service(err)) => service_exit_code(err),
            _ => EXIT_FAILURE,
        }
    }
}

fn service_exit_code(err: &PetitionServiceError) -> i32 {
    match err {
        PetitionServiceError::NotFound(_) => EXIT_NOT_FOUND,
        PetitionServiceError::InvalidState { .. } => EXIT_INVALID_STATE,
        PetitionServiceError::Validation(_) => EXIT_VALIDATION,
        _ => EXIT_FAILURE,
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "{message}"),
            Self::Store(err) => write!(f, "failed to open petition store: {err}"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to encode output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Store(err) => Some(err),
            Self::Auth(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<AuthError> for CliError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<PolicyError> for CliError {
    fn from(value: PolicyError) -> Self {
        Self::Auth(AuthError::Denied(value))
    }
}

impl From<PetitionServiceError> for CliError {
    fn from(value: PetitionServiceError) -> Self {
        Self::Auth(AuthError::Service(value))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

/// Store, service and caller for one invocation.
pub struct Context {
    service: PetitionService<Repo>,
    principal: Principal,
}

impl Context {
    /// Resolves environment plus flags, starts logging and opens the store.
    ///
    /// Without a database path the store lives in memory and starts with
    /// the sample petitions.
    pub fn open(global: &GlobalArgs) -> CliResult<Self> {
        let config = CoreConfig::from_env()
            .and_then(|config| {
                config.with_overrides(
                    global.db.clone(),
                    global.log_level.as_deref(),
                    global.log_dir.clone(),
                )
            })
            .map_err(CliError::Config)?;

        if let Some(log_dir) = config.log_dir.as_deref() {
            init_logging(config.log_level, &log_dir.to_string_lossy())
                .map_err(CliError::Config)?;
        }

        let repo: Repo = match config.db_path.as_deref() {
            Some(path) => Box::new(SqlitePetitionRepository::open(path).map_err(CliError::Store)?),
            None => Box::new(InMemoryPetitionRepository::new()),
        };
        let service = PetitionService::new(repo);
        if config.db_path.is_none() {
            service.seed_sample_petitions()?;
        }

        let principal = Principal::from_user_name(global.user.as_deref());
        info!(
            "event=cli_start module=cli status=ok core_version={} store={} authenticated={}",
            core_version(),
            if config.db_path.is_some() { "sqlite" } else { "memory" },
            principal.is_authenticated()
        );
        Ok(Self { service, principal })
    }

    pub fn petitions(&self) -> AuthorizedPetitions<'_, Repo> {
        AuthorizedPetitions::new(&self.service, self.principal.clone())
    }

    pub fn service(&self) -> &PetitionService<Repo> {
        &self.service
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// Writes `value` to stdout as pretty JSON.
pub fn emit<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
