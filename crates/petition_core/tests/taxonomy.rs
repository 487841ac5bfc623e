mod common;

use common::{request, services};
use petition_core::PetitionUpdate;

#[test]
fn categories_are_distinct_sorted_and_case_sensitive() {
    for (backend, service) in services() {
        for (title, category) in [
            ("a", "Transportation"),
            ("b", "Education"),
            ("c", "Transportation"),
            ("d", "education"),
            ("e", "Healthcare"),
        ] {
            service.create_petition(request(title, category)).unwrap();
        }

        assert_eq!(
            service.list_categories().unwrap(),
            vec!["Education", "Healthcare", "Transportation", "education"],
            "{backend}"
        );
    }
}

#[test]
fn themes_follow_live_data() {
    for (backend, service) in services() {
        assert!(service.list_themes().unwrap().is_empty(), "{backend}");

        let mut first = request("a", "Misc");
        first.theme = "Funding".to_string();
        let first = service.create_petition(first).unwrap();
        let mut second = request("b", "Misc");
        second.theme = "Access".to_string();
        service.create_petition(second).unwrap();

        assert_eq!(service.list_themes().unwrap(), vec!["Access", "Funding"], "{backend}");

        service
            .update_petition(
                first.id,
                &PetitionUpdate {
                    theme: Some("Energy".to_string()),
                    ..PetitionUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(service.list_themes().unwrap(), vec!["Access", "Energy"], "{backend}");
    }
}

#[test]
fn blank_labels_are_listed_like_any_other_value() {
    for (backend, service) in services() {
        service.create_petition(request("untagged", "")).unwrap();
        service.create_petition(request("tagged", "Parks")).unwrap();
        service.create_petition(request("also untagged", "   ")).unwrap();
        assert_eq!(
            service.list_categories().unwrap(),
            vec!["", "Parks"],
            "{backend}"
        );
    }
}
