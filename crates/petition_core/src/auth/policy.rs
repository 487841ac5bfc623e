//! Principal/action policy table.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller identity as resolved by the outer adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Principal {
    Anonymous,
    /// Authenticated user name.
    User(String),
}

impl Principal {
    /// Builds a principal from an optional user name; blank names are anonymous.
    pub fn from_user_name(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => Self::User(name.to_string()),
            None => Self::Anonymous,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User(name) => Some(name.as_str()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// Petition action subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Read,
    Sign,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Stable id used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Sign => "sign",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Whether this action is reserved for authenticated users.
    pub fn requires_authentication(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }
}

/// Policy rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    Unauthenticated { action: Action },
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated { action } => {
                write!(f, "action `{}` requires an authenticated user", action.as_str())
            }
        }
    }
}

impl Error for PolicyError {}

/// Checks whether `principal` may perform `action`.
pub fn authorize(principal: &Principal, action: Action) -> Result<(), PolicyError> {
    if action.requires_authentication() && !principal.is_authenticated() {
        return Err(PolicyError::Unauthenticated { action });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{authorize, Action, Principal, PolicyError};

    #[test]
    fn anonymous_may_read_and_sign_only() {
        let anonymous = Principal::Anonymous;
        assert!(authorize(&anonymous, Action::Read).is_ok());
        assert!(authorize(&anonymous, Action::Sign).is_ok());
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert_eq!(
                authorize(&anonymous, action),
                Err(PolicyError::Unauthenticated { action })
            );
        }
    }

    #[test]
    fn blank_user_name_is_anonymous() {
        assert_eq!(Principal::from_user_name(Some("  ")), Principal::Anonymous);
        assert_eq!(Principal::from_user_name(None), Principal::Anonymous);
        assert_eq!(
            Principal::from_user_name(Some(" alice ")),
            Principal::User("alice".to_string())
        );
    }
}
