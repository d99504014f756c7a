//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, triage categories, errors)
//! - `patient` - Casualty records and derived clinical indices
//! - `ahp` - Pure AHP prioritization (weights, consistency, scoring, ranking)

pub mod ahp;
pub mod foundation;
pub mod patient;
