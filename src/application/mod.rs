//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers read the clock and the ports; the domain below them does neither.

pub mod handlers;

pub use handlers::{
    EvaluateHierarchyHandler, GetPatientHandler, RankCategoryHandler, RankCategoryQuery,
    RankCategoryResult, RankPatientsCommand, RankPatientsHandler, RankPatientsResult,
    RegisterPatientCommand, RegisterPatientHandler, RegisterPatientResult,
};
