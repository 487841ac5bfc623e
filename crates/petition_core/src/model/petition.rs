//! Petition domain model.
//!
//! # Responsibility
//! - Define the canonical petition record and its lifecycle states.
//! - Validate creation/update input before it reaches a store.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused.
//! - `signature_count >= 1` for every persisted petition.
//! - Status only moves forward: `Active -> UnderReview -> Closed`, or
//!   `Active -> Closed`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Store-assigned petition identifier.
pub type PetitionId = i64;

/// Signature count every new petition starts with (the creator's own).
pub const INITIAL_SIGNATURE_COUNT: u64 = 1;

/// Petition lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetitionStatus {
    /// Open for signatures.
    Active,
    /// Handed over to the target government body.
    UnderReview,
    /// No longer accepting signatures.
    Closed,
}

impl PetitionStatus {
    /// Stable storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::UnderReview => "under_review",
            Self::Closed => "closed",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::UnderReview => "Under Review",
            Self::Closed => "Closed",
        }
    }

    /// Returns whether a petition in this state accepts new signatures.
    pub fn is_signable(self) -> bool {
        self == Self::Active
    }

    /// Returns whether `self -> next` is an allowed transition.
    ///
    /// Re-applying the current status is allowed and is a no-op.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Active)
                | (Self::Active, Self::UnderReview)
                | (Self::Active, Self::Closed)
                | (Self::UnderReview, Self::UnderReview)
                | (Self::UnderReview, Self::Closed)
                | (Self::Closed, Self::Closed)
        )
    }
}

impl Display for PetitionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PetitionStatus {
    type Err = ParseStatusError;

    /// Case-insensitive; accepts `UnderReview`, `Under Review` and `under_review`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .trim()
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "active" => Ok(Self::Active),
            "underreview" => Ok(Self::UnderReview),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseStatusError(value.to_string())),
        }
    }
}

/// Unknown petition status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl Display for ParseStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown petition status `{}`; expected active|under_review|closed",
            self.0
        )
    }
}

impl Error for ParseStatusError {}

/// Government level a petition is addressed to.
///
/// Stores keep `target_level` as free text; this enum is a parse helper for
/// callers that want to offer the well-known levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetLevel {
    Federal,
    State,
    Local,
}

impl TargetLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::State => "State",
            Self::Local => "Local",
        }
    }

    /// Parses a level case-insensitively. Returns `None` for unknown text.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "federal" => Some(Self::Federal),
            "state" => Some(Self::State),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Canonical petition record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Petition {
    pub id: PetitionId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub theme: String,
    pub created_by: String,
    /// Free text; see [`TargetLevel`] for the well-known values.
    pub target_level: String,
    pub status: PetitionStatus,
    pub signature_count: u64,
    /// Unix epoch milliseconds. Immutable after creation.
    pub created_at: i64,
    /// Unix epoch milliseconds. Bumped on every mutation.
    pub last_updated: i64,
}

impl Petition {
    /// Checks required text fields and the signature floor.
    pub fn validate(&self) -> Result<(), PetitionValidationError> {
        validate_record(&self.title, &self.description, self.signature_count)
    }
}

/// Fully-populated petition data without an id, handed to a store for
/// insertion.
///
/// Creation builds drafts with `status = Active` and one signature; seeding
/// and imports may carry historical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetitionDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub theme: String,
    pub created_by: String,
    pub target_level: String,
    pub status: PetitionStatus,
    pub signature_count: u64,
    pub created_at: i64,
    pub last_updated: i64,
}

impl PetitionDraft {
    /// Attaches a store-assigned id.
    pub fn into_petition(self, id: PetitionId) -> Petition {
        Petition {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            theme: self.theme,
            created_by: self.created_by,
            target_level: self.target_level,
            status: self.status,
            signature_count: self.signature_count,
            created_at: self.created_at,
            last_updated: self.last_updated,
        }
    }

    /// Checks required text fields and the signature floor.
    pub fn validate(&self) -> Result<(), PetitionValidationError> {
        validate_record(&self.title, &self.description, self.signature_count)
    }
}

/// Caller input for creating a petition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePetitionRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub theme: String,
    pub created_by: String,
    pub target_level: String,
}

impl CreatePetitionRequest {
    pub fn validate(&self) -> Result<(), PetitionValidationError> {
        validate_title(&self.title)?;
        validate_description(&self.description)
    }

    /// Builds an `Active` draft with the initial signature, stamped `now_ms`.
    pub fn into_draft(self, now_ms: i64) -> PetitionDraft {
        PetitionDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: normalize_label(&self.category),
            theme: normalize_label(&self.theme),
            created_by: self.created_by.trim().to_string(),
            target_level: normalize_label(&self.target_level),
            status: PetitionStatus::Active,
            signature_count: INITIAL_SIGNATURE_COUNT,
            created_at: now_ms,
            last_updated: now_ms,
        }
    }
}

/// Partial replacement of mutable petition fields. `None` keeps the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetitionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub theme: Option<String>,
    pub target_level: Option<String>,
    pub status: Option<PetitionStatus>,
}

impl PetitionUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), PetitionValidationError> {
        if let Some(title) = self.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(description) = self.description.as_deref() {
            validate_description(description)?;
        }
        Ok(())
    }

    /// Applies text replacements to `petition`. Status is left to the caller,
    /// which owns the transition rules.
    pub fn apply_fields(&self, petition: &mut Petition) {
        if let Some(title) = self.title.as_deref() {
            petition.title = title.trim().to_string();
        }
        if let Some(description) = self.description.as_deref() {
            petition.description = description.trim().to_string();
        }
        if let Some(category) = self.category.as_deref() {
            petition.category = normalize_label(category);
        }
        if let Some(theme) = self.theme.as_deref() {
            petition.theme = normalize_label(theme);
        }
        if let Some(level) = self.target_level.as_deref() {
            petition.target_level = normalize_label(level);
        }
    }
}

/// Input validation failures for petition writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetitionValidationError {
    EmptyTitle,
    EmptyDescription,
    SignatureCountBelowMinimum(u64),
}

impl Display for PetitionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "petition title is required"),
            Self::EmptyDescription => write!(f, "petition description is required"),
            Self::SignatureCountBelowMinimum(count) => write!(
                f,
                "signature count {count} is below minimum {INITIAL_SIGNATURE_COUNT}"
            ),
        }
    }
}

impl Error for PetitionValidationError {}

/// Trims and collapses inner whitespace runs of a classification label.
pub fn normalize_label(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

fn validate_record(
    title: &str,
    description: &str,
    signature_count: u64,
) -> Result<(), PetitionValidationError> {
    validate_title(title)?;
    validate_description(description)?;
    if signature_count < INITIAL_SIGNATURE_COUNT {
        return Err(PetitionValidationError::SignatureCountBelowMinimum(
            signature_count,
        ));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), PetitionValidationError> {
    if title.trim().is_empty() {
        return Err(PetitionValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), PetitionValidationError> {
    if description.trim().is_empty() {
        return Err(PetitionValidationError::EmptyDescription);
    }
    Ok(())
}
