//! Petition store contracts and persistence adapters.
//!
//! # Responsibility
//! - Define the storage contract every backend satisfies.
//! - Keep SQL and locking details out of the service layer.
//!
//! # Invariants
//! - Ids are assigned by the store, strictly increasing, never reused.
//! - Every write is individually atomic; `modify` is the only
//!   read-modify-write path and is serialized per record.
//! - A cancelled write leaves no visible change.

pub mod memory_repo;
pub mod petition_repo;
pub mod sqlite_repo;
