//! Category/theme taxonomy derived from live petition data.

use crate::model::petition::Petition;
use std::collections::BTreeSet;

/// Distinct categories, exact-match deduplicated, ascending. A blank
/// category is a value like any other and sorts first.
pub fn distinct_categories(petitions: &[Petition]) -> Vec<String> {
    distinct_sorted(petitions.iter().map(|petition| petition.category.as_str()))
}

/// Distinct themes, exact-match deduplicated, ascending.
pub fn distinct_themes(petitions: &[Petition]) -> Vec<String> {
    distinct_sorted(petitions.iter().map(|petition| petition.theme.as_str()))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{distinct_categories, distinct_themes};
    use crate::model::petition::CreatePetitionRequest;

    #[test]
    fn dedup_is_case_sensitive_and_sorted() {
        let rows = [
            ("Health", "Access"),
            ("Education", "Funding"),
            ("Health", "access"),
            ("health", ""),
        ];
        let petitions: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(index, (category, theme))| {
                CreatePetitionRequest {
                    title: "t".to_string(),
                    description: "d".to_string(),
                    category: category.to_string(),
                    theme: theme.to_string(),
                    ..CreatePetitionRequest::default()
                }
                .into_draft(0)
                .into_petition(index as i64 + 1)
            })
            .collect();

        assert_eq!(
            distinct_categories(&petitions),
            vec!["Education", "Health", "health"]
        );
        assert_eq!(
            distinct_themes(&petitions),
            vec!["", "Access", "Funding", "access"]
        );
    }
}
