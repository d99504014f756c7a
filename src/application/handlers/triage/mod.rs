//! Triage handlers - Ranking, hierarchy inspection and patient registration.

mod evaluate_hierarchy;
mod get_patient;
mod rank_category;
mod rank_patients;
mod register_patient;

pub use evaluate_hierarchy::EvaluateHierarchyHandler;
pub use get_patient::GetPatientHandler;
pub use rank_category::{RankCategoryHandler, RankCategoryQuery, RankCategoryResult};
pub use rank_patients::{RankPatientsCommand, RankPatientsHandler, RankPatientsResult};
pub use register_patient::{RegisterPatientCommand, RegisterPatientHandler, RegisterPatientResult};
