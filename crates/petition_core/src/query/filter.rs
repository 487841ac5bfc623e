//! Petition filter, search and pagination.
//!
//! # Invariants
//! - Equality filters and free-text search are case-insensitive.
//! - Results are ordered by `created_at DESC`; ties keep snapshot order,
//!   which stores guarantee to be insertion order.
//! - Out-of-range pages yield an empty page.

use crate::model::petition::{Petition, PetitionStatus};
use serde::{Deserialize, Deserializer, Serialize};

/// Page number used when none (or zero) is given.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when none (or zero) is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest accepted page size; bigger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Optional listing constraints. Absent or blank fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetitionFilter {
    pub category: Option<String>,
    pub theme: Option<String>,
    /// Accepts any spelling `PetitionStatus::from_str` does (`active`,
    /// `Under Review`, `under_review`, ...).
    #[serde(deserialize_with = "lenient_status")]
    pub status: Option<PetitionStatus>,
    pub target_level: Option<String>,
    /// Substring matched against title or description.
    pub search_text: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PetitionFilter {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_status(mut self, status: PetitionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_target_level(mut self, level: impl Into<String>) -> Self {
        self.target_level = Some(level.into());
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Effective page after clamping.
    pub fn applied_page(&self) -> u32 {
        match self.page {
            Some(page) if page >= 1 => page,
            _ => DEFAULT_PAGE,
        }
    }

    /// Effective page size after clamping to `1..=MAX_PAGE_SIZE`.
    pub fn applied_page_size(&self) -> u32 {
        match self.page_size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        }
    }

    /// Returns whether `petition` satisfies every populated constraint.
    pub fn matches(&self, petition: &Petition) -> bool {
        if let Some(status) = self.status {
            if petition.status != status {
                return false;
            }
        }

        let equality_filters = [
            (self.category.as_deref(), petition.category.as_str()),
            (self.theme.as_deref(), petition.theme.as_str()),
            (self.target_level.as_deref(), petition.target_level.as_str()),
        ];
        for (wanted, actual) in equality_filters {
            if let Some(wanted) = non_blank(wanted) {
                if !eq_ignore_case(wanted, actual) {
                    return false;
                }
            }
        }

        match non_blank(self.search_text.as_deref()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                petition.title.to_lowercase().contains(&needle)
                    || petition.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionPage {
    pub items: Vec<Petition>,
    /// Effective page after clamping.
    pub page: u32,
    /// Effective page size after clamping.
    pub page_size: u32,
    /// Matches across all pages.
    pub total_matches: usize,
}

/// Runs `filter` over `snapshot` and returns the requested page.
///
/// `snapshot` must be in insertion order; it is used as the tie-breaker.
pub fn query_page(snapshot: Vec<Petition>, filter: &PetitionFilter) -> PetitionPage {
    let mut matched: Vec<Petition> = snapshot
        .into_iter()
        .filter(|petition| filter.matches(petition))
        .collect();
    // Stable sort keeps insertion order among equal timestamps.
    matched.sort_by(|left, right| right.created_at.cmp(&left.created_at));

    let page = filter.applied_page();
    let page_size = filter.applied_page_size();
    let total_matches = matched.len();
    let skip = usize::try_from(u64::from(page - 1) * u64::from(page_size)).unwrap_or(usize::MAX);

    let items = matched
        .into_iter()
        .skip(skip)
        .take(page_size as usize)
        .collect();

    PetitionPage {
        items,
        page,
        page_size,
        total_matches,
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<PetitionStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match non_blank(raw.as_deref()) {
        Some(text) => text
            .parse::<PetitionStatus>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn eq_ignore_case(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.trim().to_lowercase()
}
