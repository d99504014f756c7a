//! Priority Aggregator - Combines leaf scores into one global priority per patient.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ConfigurationError, CriterionHierarchy, CriterionNode, ScoringContext, ScoringRegistry};
use crate::domain::foundation::PatientId;
use crate::domain::patient::{ClinicalSummary, PatientRecord};

/// A patient with every intermediate score retained for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPatient {
    pub patient_id: PatientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    pub record: PatientRecord,
    /// Raw normalized score (0..1) for every leaf criterion.
    pub leaf_scores: BTreeMap<String, f64>,
    /// Aggregated score for every top-level criterion.
    pub criterion_scores: BTreeMap<String, f64>,
    /// Weighted sum over top-level criteria; higher means more urgent.
    pub global_priority: f64,
    /// 1-based position after ranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub clinical: ClinicalSummary,
}

/// Scores patients against a weighted hierarchy.
pub struct PriorityAggregator;

impl PriorityAggregator {
    /// Scores one patient.
    ///
    /// # Algorithm
    /// - Leaf criterion: rule score from the registry
    /// - Parent criterion: Σ(child score × child weight)
    /// - Global priority: Σ(top-level score × top-level weight)
    ///
    /// # Errors
    ///
    /// `MissingScoringRule` naming the first leaf with no registered rule.
    pub fn score(
        record: &PatientRecord,
        hierarchy: &CriterionHierarchy,
        registry: &ScoringRegistry,
        ctx: &ScoringContext,
    ) -> Result<ScoredPatient, ConfigurationError> {
        let mut leaf_scores = BTreeMap::new();
        let mut criterion_scores = BTreeMap::new();
        let mut global_priority = 0.0;

        for criterion in hierarchy.top_level() {
            let score = Self::node_score(criterion, record, registry, ctx, &mut leaf_scores)?;
            criterion_scores.insert(criterion.id.clone(), score);
            global_priority += score * criterion.weight;
        }

        Ok(ScoredPatient {
            patient_id: record.id.clone(),
            card_id: record.card_id.clone(),
            record: record.clone(),
            leaf_scores,
            criterion_scores,
            global_priority,
            rank: None,
            clinical: ClinicalSummary::for_record(record, ctx.reference_date),
        })
    }

    fn node_score(
        node: &CriterionNode,
        record: &PatientRecord,
        registry: &ScoringRegistry,
        ctx: &ScoringContext,
        leaf_scores: &mut BTreeMap<String, f64>,
    ) -> Result<f64, ConfigurationError> {
        if node.is_leaf() {
            let score = registry.score(record, &node.id, ctx)?;
            leaf_scores.insert(node.id.clone(), score);
            return Ok(score);
        }

        let mut total = 0.0;
        for child in &node.children {
            total += Self::node_score(child, record, registry, ctx, leaf_scores)? * child.weight;
        }
        Ok(total)
    }
}
