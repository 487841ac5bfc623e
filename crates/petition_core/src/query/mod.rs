//! Read-side query engine over petition snapshots.
//!
//! # Responsibility
//! - Filter, search, order and paginate petition listings.
//! - Derive the category/theme taxonomy from current data.
//!
//! # Invariants
//! - Query code never mutates the store; it only sees a momentary snapshot.
//! - Zero matches is an empty result, never an error.

pub mod filter;
pub mod taxonomy;
