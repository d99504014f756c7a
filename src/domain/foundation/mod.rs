//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, enums, and error types that form the vocabulary
//! of the casualty triage domain.

mod errors;
mod ids;
mod triage_category;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::PatientId;
pub use triage_category::TriageCategory;
