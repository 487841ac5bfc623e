//! Petition domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own input validation and the status transition table.
//!
//! # Invariants
//! - Every petition is identified by a store-assigned `PetitionId`.
//! - Only `Active` petitions accept signatures.

pub mod petition;
