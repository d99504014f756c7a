//! Triage Engine - `rank_patients` entry point tying the AHP pieces together.

use serde::{Deserialize, Serialize};

use super::{
    ConfigurationError, ConsistencyReport, CriterionHierarchy, CriterionWeight, HierarchyConfig,
    PriorityAggregator, Ranker, ScoredPatient, ScoringContext, ScoringRegistry,
};
use crate::domain::foundation::TriageCategory;
use crate::domain::patient::PatientRecord;

/// Weights and consistency of a hierarchy, without patients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyEvaluation {
    pub weights: Vec<CriterionWeight>,
    pub consistency: ConsistencyReport,
}

/// Result of ranking one triage category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRanking {
    pub category: TriageCategory,
    /// Patients ordered by rank ascending.
    pub ranked_patients: Vec<ScoredPatient>,
    pub weights: Vec<CriterionWeight>,
    pub consistency: ConsistencyReport,
    /// Records supplied but left out because their category differs.
    pub excluded_count: usize,
}

impl TriageRanking {
    /// True when no patient matched the category.
    pub fn is_empty(&self) -> bool {
        self.ranked_patients.is_empty()
    }
}

/// Stateless prioritization engine over a scoring registry.
///
/// Pure: identical inputs always give identical outputs, and inputs are
/// never mutated.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    registry: ScoringRegistry,
}

impl TriageEngine {
    /// Creates an engine with a custom registry.
    pub fn new(registry: ScoringRegistry) -> Self {
        Self { registry }
    }

    /// Engine with the built-in clinical rules.
    pub fn standard() -> Self {
        Self::new(ScoringRegistry::standard())
    }

    /// The rules used for leaf criteria.
    pub fn registry(&self) -> &ScoringRegistry {
        &self.registry
    }

    /// Builds the hierarchy and verifies every leaf has a scoring rule.
    pub fn prepare(&self, config: &HierarchyConfig) -> Result<CriterionHierarchy, ConfigurationError> {
        let hierarchy = CriterionHierarchy::build(config)?;
        self.registry.ensure_covers(hierarchy.leaf_ids())?;
        Ok(hierarchy)
    }

    /// Resolves weights and consistency for a configuration.
    pub fn evaluate(&self, config: &HierarchyConfig) -> Result<HierarchyEvaluation, ConfigurationError> {
        let hierarchy = self.prepare(config)?;
        Ok(HierarchyEvaluation {
            weights: hierarchy.weights(),
            consistency: hierarchy.consistency().clone(),
        })
    }

    /// Ranks the patients of one triage category.
    ///
    /// Configuration is validated before any patient is looked at, so a
    /// broken hierarchy fails even when the category is empty. Records whose
    /// category differs from `category` are skipped and counted.
    ///
    /// # Errors
    ///
    /// Any `ConfigurationError`; no partial ranking is produced.
    pub fn rank_patients(
        &self,
        category: TriageCategory,
        patients: &[PatientRecord],
        config: &HierarchyConfig,
        ctx: &ScoringContext,
    ) -> Result<TriageRanking, ConfigurationError> {
        let hierarchy = self.prepare(config)?;

        let in_category: Vec<&PatientRecord> =
            patients.iter().filter(|p| p.is_in_category(category)).collect();
        let excluded_count = patients.len() - in_category.len();

        let scored = in_category
            .into_iter()
            .map(|record| PriorityAggregator::score(record, &hierarchy, &self.registry, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TriageRanking {
            category,
            ranked_patients: Ranker::rank(scored),
            weights: hierarchy.weights(),
            consistency: hierarchy.consistency().clone(),
            excluded_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{CriterionConfig, GOAL_ID};
    use crate::domain::foundation::PatientId;
    use crate::domain::patient::AirwayStatus;

    fn patient(id: &str, category: TriageCategory) -> PatientRecord {
        PatientRecord::builder(PatientId::new(id).unwrap())
            .category(category)
            .build()
    }

    #[test]
    fn empty_category_returns_empty_ranking() {
        let engine = TriageEngine::standard();
        let patients = vec![patient("p1", TriageCategory::Delayed)];
        let ranking = engine
            .rank_patients(
                TriageCategory::Immediate,
                &patients,
                &HierarchyConfig::standard(),
                &ScoringContext::default(),
            )
            .unwrap();

        assert!(ranking.is_empty());
        assert_eq!(ranking.excluded_count, 1);
        assert_eq!(ranking.weights.len(), 5);
    }

    #[test]
    fn missing_rule_fails_even_without_patients() {
        let engine = TriageEngine::standard();
        let config = HierarchyConfig {
            criteria: vec![
                CriterionConfig::leaf("airway", "Airway"),
                CriterionConfig::leaf("pupils", "Pupils"),
            ],
            comparisons: vec![vec![1.0, 2.0], vec![0.5, 1.0]],
        };
        let err = engine
            .rank_patients(TriageCategory::Immediate, &[], &config, &ScoringContext::default())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingScoringRule {
                criterion_id: "pupils".to_string()
            }
        );
    }

    #[test]
    fn worse_airway_ranks_first() {
        let engine = TriageEngine::standard();
        let clear = PatientRecord::builder(PatientId::new("clear").unwrap())
            .category(TriageCategory::Immediate)
            .airway(AirwayStatus::Clear)
            .build();
        let blocked = PatientRecord::builder(PatientId::new("blocked").unwrap())
            .category(TriageCategory::Immediate)
            .airway(AirwayStatus::Obstructed)
            .build();

        let ranking = engine
            .rank_patients(
                TriageCategory::Immediate,
                &[clear, blocked],
                &HierarchyConfig::standard(),
                &ScoringContext::default(),
            )
            .unwrap();

        assert_eq!(ranking.ranked_patients[0].patient_id.as_str(), "blocked");
        assert_eq!(ranking.ranked_patients[0].rank, Some(1));
        assert_eq!(ranking.ranked_patients[1].rank, Some(2));
    }

    #[test]
    fn evaluate_reports_all_matrices() {
        let evaluation = TriageEngine::standard()
            .evaluate(&HierarchyConfig::standard())
            .unwrap();
        assert!(!evaluation.consistency.any_inconsistent);
        assert!(evaluation.consistency.get(GOAL_ID).is_some());
        assert_eq!(evaluation.consistency.matrices.len(), 3);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let engine = TriageEngine::standard();
        let patients = vec![
            patient("a", TriageCategory::Minimal),
            patient("b", TriageCategory::Minimal),
        ];
        let run = || {
            engine
                .rank_patients(
                    TriageCategory::Minimal,
                    &patients,
                    &HierarchyConfig::standard(),
                    &ScoringContext::default(),
                )
                .unwrap()
        };
        assert_eq!(run(), run());
    }
}
