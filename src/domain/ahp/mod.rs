//! AHP Module - Analytic Hierarchy Process prioritization of casualties.
//!
//! Pairwise judgements between criteria are turned into weights, checked for
//! consistency, and combined with per-criterion patient scores into a single
//! global priority per patient.
//!
//! # Components
//!
//! - `PairwiseMatrix` - Validated square matrix of judgements
//! - `WeightDeriver` - Column-normalization weight approximation
//! - `ConsistencyChecker` - λmax, CI and CR against Saaty's random index
//! - `CriterionHierarchy` - Weighted criterion tree with consistency report
//! - `ScoringRegistry` - Leaf criterion id to scoring rule mapping
//! - `PriorityAggregator` - Weighted sum of scores into a global priority
//! - `Ranker` - Stable descending ordering with 1-based ranks
//! - `TriageEngine` - `rank_patients` entry point
//!
//! # Design Philosophy
//!
//! Everything here is pure. The reference date for age calculation arrives
//! through `ScoringContext`, so identical inputs always rank identically.

mod aggregator;
mod consistency;
mod defaults;
mod engine;
mod errors;
mod hierarchy;
mod matrix;
mod ranker;
pub mod rules;
mod scoring;
mod weights;

pub use aggregator::{PriorityAggregator, ScoredPatient};
pub use consistency::{random_index, ConsistencyChecker, ConsistencyResult, CONSISTENCY_THRESHOLD};
pub use engine::{HierarchyEvaluation, TriageEngine, TriageRanking};
pub use errors::ConfigurationError;
pub use hierarchy::{
    ConsistencyReport, CriterionConfig, CriterionHierarchy, CriterionNode, CriterionWeight,
    HierarchyConfig, MatrixConsistency, GOAL_ID, MAX_CRITERIA_DEPTH,
};
pub use matrix::PairwiseMatrix;
pub use ranker::Ranker;
pub use scoring::{ScoreFn, ScoringContext, ScoringRegistry, ScoringRule, UNKNOWN_SCORE};
pub use weights::WeightDeriver;
