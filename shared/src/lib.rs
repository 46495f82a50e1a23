//! Shared types and models for the Bhoomi Field Analysis Platform
//!
//! This crate contains the pure domain layer shared between the backend and
//! its tests: coordinates, the session state machine, classification rules,
//! and the bilingual recommendation tables.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
