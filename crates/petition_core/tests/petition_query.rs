mod common;

use common::{request, service_over, services};
use petition_core::{
    InMemoryPetitionRepository, ManualClock, Petition, PetitionFilter, PetitionRepository,
    PetitionService, PetitionStatus, SqlitePetitionRepository,
};
use std::sync::Arc;

fn ids(petitions: &[Petition]) -> Vec<i64> {
    petitions.iter().map(|petition| petition.id).collect()
}

#[test]
fn no_filter_lists_everything_newest_first() {
    for (backend, service) in services() {
        let created: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|title| service.create_petition(request(title, "Misc")).unwrap())
            .collect();

        let listed = service.list_petitions(&PetitionFilter::default()).unwrap();
        assert_eq!(
            ids(&listed),
            vec![created[2].id, created[1].id, created[0].id],
            "{backend}"
        );
    }
}

#[test]
fn second_page_of_two_returns_third_and_fourth() {
    for (backend, service) in services() {
        let created: Vec<_> = (0..5)
            .map(|index| {
                service
                    .create_petition(request(&format!("p{index}"), "Misc"))
                    .unwrap()
            })
            .collect();

        let page = service
            .query_petitions(&PetitionFilter::default().with_page(2, 2))
            .unwrap();
        // Newest first: p4, p3, p2, p1, p0.
        assert_eq!(ids(&page.items), vec![created[2].id, created[1].id], "{backend}");
        assert_eq!(page.total_matches, 5, "{backend}");
        assert_eq!((page.page, page.page_size), (2, 2), "{backend}");
    }
}

#[test]
fn page_past_the_end_is_empty_not_error() {
    for (backend, service) in services() {
        for index in 0..3 {
            service
                .create_petition(request(&format!("p{index}"), "Misc"))
                .unwrap();
        }
        let listed = service
            .list_petitions(&PetitionFilter::default().with_page(4, 1))
            .unwrap();
        assert!(listed.is_empty(), "{backend}");

        let listed = service
            .list_petitions(&PetitionFilter::default().with_page(2, 3))
            .unwrap();
        assert!(listed.is_empty(), "{backend}");
    }
}

#[test]
fn category_filter_returns_only_matching_petition() {
    for (backend, service) in services() {
        let mut transit = request("Improve Transit", "Transportation");
        transit.description =
            "Add more buses and extend light rail service across the city".to_string();
        let transit = service.create_petition(transit).unwrap();
        service
            .create_petition(request("Better Schools", "Education"))
            .unwrap();

        let listed = service
            .list_petitions(&PetitionFilter::default().with_category("Transportation"))
            .unwrap();
        assert_eq!(listed, vec![transit], "{backend}");
    }
}

#[test]
fn unmatched_category_is_empty() {
    for (backend, service) in services() {
        service.create_petition(request("Parks", "Environment")).unwrap();
        let listed = service
            .list_petitions(&PetitionFilter::default().with_category("Agriculture"))
            .unwrap();
        assert!(listed.is_empty(), "{backend}");
    }
}

#[test]
fn filters_combine_case_insensitively() {
    for (backend, service) in services() {
        let mut local = request("Clean the river", "Environment");
        local.theme = "Water".to_string();
        local.target_level = "Local".to_string();
        let local = service.create_petition(local).unwrap();

        let mut state = request("Clean the air", "Environment");
        state.theme = "Air".to_string();
        state.target_level = "State".to_string();
        service.create_petition(state).unwrap();

        let filter = PetitionFilter::default()
            .with_category("ENVIRONMENT")
            .with_theme("water")
            .with_target_level("local")
            .with_status(PetitionStatus::Active);
        let listed = service.list_petitions(&filter).unwrap();
        assert_eq!(ids(&listed), vec![local.id], "{backend}");
    }
}

#[test]
fn status_filter_separates_closed_petitions() {
    for (backend, service) in services() {
        let open = service.create_petition(request("Open", "Misc")).unwrap();
        let closed = service.create_petition(request("Done", "Misc")).unwrap();
        service.set_status(closed.id, PetitionStatus::Closed).unwrap();

        let active = service
            .list_petitions(&PetitionFilter::default().with_status(PetitionStatus::Active))
            .unwrap();
        assert_eq!(ids(&active), vec![open.id], "{backend}");

        let finished = service
            .list_petitions(&PetitionFilter::default().with_status(PetitionStatus::Closed))
            .unwrap();
        assert_eq!(ids(&finished), vec![closed.id], "{backend}");
    }
}

#[test]
fn search_matches_title_or_description_substring() {
    for (backend, service) in services() {
        let mut by_title = request("Bike LANES downtown", "Transportation");
        by_title.description = "Protected cycling routes".to_string();
        let by_title = service.create_petition(by_title).unwrap();

        let mut by_description = request("Safer streets", "Transportation");
        by_description.description = "Paint new bike lanes near schools".to_string();
        let by_description = service.create_petition(by_description).unwrap();

        service.create_petition(request("Library hours", "Education")).unwrap();

        let listed = service
            .list_petitions(&PetitionFilter::default().with_search_text("bike lanes"))
            .unwrap();
        assert_eq!(ids(&listed), vec![by_description.id, by_title.id], "{backend}");
    }
}

#[test]
fn equal_timestamps_keep_insertion_order() {
    let backends: Vec<(&str, Box<dyn PetitionRepository>)> = vec![
        ("memory", Box::new(InMemoryPetitionRepository::new())),
        ("sqlite", Box::new(SqlitePetitionRepository::open_in_memory().unwrap())),
    ];

    for (backend, repo) in backends {
        let service = PetitionService::with_clock(repo, Arc::new(ManualClock::fixed(5_000)));
        let first = service.create_petition(request("first", "Misc")).unwrap();
        let second = service.create_petition(request("second", "Misc")).unwrap();
        let third = service.create_petition(request("third", "Misc")).unwrap();

        let listed = service.list_petitions(&PetitionFilter::default()).unwrap();
        assert_eq!(
            ids(&listed),
            vec![first.id, second.id, third.id],
            "{backend}"
        );
    }
}

#[test]
fn default_page_size_is_ten() {
    let service = service_over(Box::new(InMemoryPetitionRepository::new()));
    for index in 0..12 {
        service
            .create_petition(request(&format!("p{index}"), "Misc"))
            .unwrap();
    }
    let page = service.query_petitions(&PetitionFilter::default()).unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_matches, 12);
}

#[test]
fn seeded_petitions_list_newest_first() {
    for (backend, service) in services() {
        service.seed_sample_petitions().unwrap();
        let listed = service.list_petitions(&PetitionFilter::default()).unwrap();
        let titles: Vec<&str> = listed.iter().map(|petition| petition.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Expand Community Healthcare Services",
                "Improve Public Transportation Infrastructure",
                "Increase Funding for Public Schools",
                "Create More Green Spaces and Parks",
                "Implement Renewable Energy Initiative",
            ],
            "{backend}"
        );
    }
}
