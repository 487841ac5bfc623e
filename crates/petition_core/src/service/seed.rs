//! Sample petitions for demos and local development.

use crate::model::petition::{PetitionDraft, PetitionStatus};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

struct SampleRow {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    theme: &'static str,
    created_by: &'static str,
    target_level: &'static str,
    status: PetitionStatus,
    signature_count: u64,
    created_ago_ms: i64,
    updated_ago_ms: i64,
}

const SAMPLES: &[SampleRow] = &[
    SampleRow {
        title: "Improve Public Transportation Infrastructure",
        description: "We petition for significant investment in modernizing our city's public transportation system, including new bus routes, light rail expansion, and improved accessibility features.",
        category: "Transportation",
        theme: "Infrastructure",
        created_by: "Jane Smith",
        target_level: "Local",
        status: PetitionStatus::Active,
        signature_count: 1247,
        created_ago_ms: 15 * DAY_MS,
        updated_ago_ms: 2 * DAY_MS,
    },
    SampleRow {
        title: "Increase Funding for Public Schools",
        description: "Our schools need more resources. This petition calls for increased federal funding to reduce class sizes, update textbooks, and improve technology in classrooms nationwide.",
        category: "Education",
        theme: "Funding",
        created_by: "Michael Johnson",
        target_level: "Federal",
        status: PetitionStatus::Active,
        signature_count: 5683,
        created_ago_ms: 30 * DAY_MS,
        updated_ago_ms: DAY_MS,
    },
    SampleRow {
        title: "Expand Community Healthcare Services",
        description: "We need better access to healthcare in our community. This petition requests the establishment of more community health centers and extended clinic hours.",
        category: "Healthcare",
        theme: "Access",
        created_by: "Dr. Sarah Wilson",
        target_level: "State",
        status: PetitionStatus::Active,
        signature_count: 892,
        created_ago_ms: 7 * DAY_MS,
        updated_ago_ms: 6 * HOUR_MS,
    },
    SampleRow {
        title: "Create More Green Spaces and Parks",
        description: "Our neighborhoods need more parks and green spaces for recreation and environmental benefits. This petition calls for the development of at least 10 new parks in underserved areas.",
        category: "Environment",
        theme: "Recreation",
        created_by: "Green Community Coalition",
        target_level: "Local",
        status: PetitionStatus::UnderReview,
        signature_count: 2156,
        created_ago_ms: 45 * DAY_MS,
        updated_ago_ms: 3 * DAY_MS,
    },
    SampleRow {
        title: "Implement Renewable Energy Initiative",
        description: "We petition for a comprehensive renewable energy program that includes solar panel installations on public buildings and incentives for residential renewable energy adoption.",
        category: "Environment",
        theme: "Energy",
        created_by: "Climate Action Network",
        target_level: "State",
        status: PetitionStatus::Active,
        signature_count: 7234,
        created_ago_ms: 60 * DAY_MS,
        updated_ago_ms: 10 * DAY_MS,
    },
];

/// Builds the sample drafts with timestamps relative to `now_ms`.
pub fn sample_petitions(now_ms: i64) -> Vec<PetitionDraft> {
    SAMPLES
        .iter()
        .map(|row| PetitionDraft {
            title: row.title.to_string(),
            description: row.description.to_string(),
            category: row.category.to_string(),
            theme: row.theme.to_string(),
            created_by: row.created_by.to_string(),
            target_level: row.target_level.to_string(),
            status: row.status,
            signature_count: row.signature_count,
            created_at: now_ms - row.created_ago_ms,
            last_updated: now_ms - row.updated_ago_ms,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sample_petitions;

    #[test]
    fn samples_are_valid_and_predate_now() {
        let now = 100 * 24 * 60 * 60 * 1000;
        let samples = sample_petitions(now);
        assert_eq!(samples.len(), 5);
        for draft in &samples {
            draft.validate().unwrap();
            assert!(draft.created_at < draft.last_updated);
            assert!(draft.last_updated < now);
        }
    }
}
