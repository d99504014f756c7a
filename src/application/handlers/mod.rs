//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod triage;

pub use triage::{
    EvaluateHierarchyHandler, GetPatientHandler, RankCategoryHandler, RankCategoryQuery,
    RankCategoryResult, RankPatientsCommand, RankPatientsHandler, RankPatientsResult,
    RegisterPatientCommand, RegisterPatientHandler, RegisterPatientResult,
};
