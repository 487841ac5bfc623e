//! Policy-checked facade over [`PetitionService`].

use crate::auth::policy::{authorize, Action, PolicyError, Principal};
use crate::model::petition::{CreatePetitionRequest, Petition, PetitionId, PetitionUpdate};
use crate::query::filter::{PetitionFilter, PetitionPage};
use crate::repo::petition_repo::PetitionRepository;
use crate::service::petition_service::{PetitionService, PetitionServiceError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthError>;

/// Error from an authorized call: either the policy or the wrapped service.
#[derive(Debug)]
pub enum AuthError {
    Denied(PolicyError),
    Service(PetitionServiceError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Denied(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<PolicyError> for AuthError {
    fn from(value: PolicyError) -> Self {
        Self::Denied(value)
    }
}

impl From<PetitionServiceError> for AuthError {
    fn from(value: PetitionServiceError) -> Self {
        Self::Service(value)
    }
}

/// Borrowed service handle bound to one caller.
pub struct AuthorizedPetitions<'svc, R: PetitionRepository> {
    service: &'svc PetitionService<R>,
    principal: Principal,
}

impl<'svc, R: PetitionRepository> AuthorizedPetitions<'svc, R> {
    pub fn new(service: &'svc PetitionService<R>, principal: Principal) -> Self {
        Self { service, principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn list_petitions(&self, filter: &PetitionFilter) -> AuthResult<Vec<Petition>> {
        self.check(Action::Read)?;
        Ok(self.service.list_petitions(filter)?)
    }

    pub fn query_petitions(&self, filter: &PetitionFilter) -> AuthResult<PetitionPage> {
        self.check(Action::Read)?;
        Ok(self.service.query_petitions(filter)?)
    }

    pub fn get_petition(&self, id: PetitionId) -> AuthResult<Petition> {
        self.check(Action::Read)?;
        Ok(self.service.get_petition(id)?)
    }

    pub fn list_categories(&self) -> AuthResult<Vec<String>> {
        self.check(Action::Read)?;
        Ok(self.service.list_categories()?)
    }

    pub fn list_themes(&self) -> AuthResult<Vec<String>> {
        self.check(Action::Read)?;
        Ok(self.service.list_themes()?)
    }

    pub fn sign_petition(&self, id: PetitionId) -> AuthResult<Petition> {
        self.check(Action::Sign)?;
        Ok(self.service.sign_petition(id)?)
    }

    /// Creates a petition authored by the calling user.
    ///
    /// `created_by` from the request is replaced with the principal's name.
    pub fn create_petition(&self, mut request: CreatePetitionRequest) -> AuthResult<Petition> {
        self.check(Action::Create)?;
        if let Some(name) = self.principal.user_name() {
            request.created_by = name.to_string();
        }
        Ok(self.service.create_petition(request)?)
    }

    pub fn update_petition(&self, id: PetitionId, update: &PetitionUpdate) -> AuthResult<Petition> {
        self.check(Action::Update)?;
        Ok(self.service.update_petition(id, update)?)
    }

    pub fn delete_petition(&self, id: PetitionId) -> AuthResult<()> {
        self.check(Action::Delete)?;
        Ok(self.service.delete_petition(id)?)
    }

    fn check(&self, action: Action) -> AuthResult<()> {
        authorize(&self.principal, action).map_err(|err| {
            warn!(
                "event=auth_denied module=auth status=denied action={}",
                action.as_str()
            );
            AuthError::from(err)
        })
    }
}
