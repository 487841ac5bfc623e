#![allow(dead_code)]

use petition_core::{
    CreatePetitionRequest, InMemoryPetitionRepository, ManualClock, PetitionRepository,
    PetitionService, SqlitePetitionRepository,
};
use std::sync::Arc;

pub type DynService = PetitionService<Box<dyn PetitionRepository>>;

/// One fresh service per backend, each with a clock stepping 1s per read.
pub fn services() -> Vec<(&'static str, DynService)> {
    vec![
        ("memory", service_over(Box::new(InMemoryPetitionRepository::new()))),
        (
            "sqlite",
            service_over(Box::new(SqlitePetitionRepository::open_in_memory().unwrap())),
        ),
    ]
}

pub fn service_over(repo: Box<dyn PetitionRepository>) -> DynService {
    PetitionService::with_clock(repo, Arc::new(ManualClock::stepping(1_000_000, 1_000)))
}

pub fn request(title: &str, category: &str) -> CreatePetitionRequest {
    CreatePetitionRequest {
        title: title.to_string(),
        description: format!("{title}: details for the council"),
        category: category.to_string(),
        theme: "General".to_string(),
        created_by: "tester".to_string(),
        target_level: "Local".to_string(),
    }
}
