//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the petition use-cases.
//! - Keep adapters (CLI, authorization) decoupled from storage details.

pub mod petition_service;
pub mod seed;
