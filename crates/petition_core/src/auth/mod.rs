//! Authorization layer over the petition service.
//!
//! # Responsibility
//! - Decide which principal may run which petition action.
//! - Wrap core operations without duplicating their logic.
//!
//! # Invariants
//! - Reads and signatures are open to anonymous callers.
//! - Create, update and delete require an authenticated user.
//! - Identity issuance happens outside this crate; callers pass an
//!   already-resolved `Principal`.

pub mod guard;
pub mod policy;
