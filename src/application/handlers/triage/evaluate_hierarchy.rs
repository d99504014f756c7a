//! EvaluateHierarchyHandler - Weights and consistency of the configured hierarchy.

use std::sync::Arc;

use tracing::debug;

use super::rank_patients::log_consistency_warnings;
use crate::domain::ahp::{HierarchyEvaluation, TriageEngine};
use crate::domain::foundation::DomainError;
use crate::ports::HierarchyProvider;

/// Handler for inspecting the hierarchy without ranking anyone.
pub struct EvaluateHierarchyHandler {
    hierarchy: Arc<dyn HierarchyProvider>,
    engine: TriageEngine,
}

impl EvaluateHierarchyHandler {
    pub fn new(hierarchy: Arc<dyn HierarchyProvider>, engine: TriageEngine) -> Self {
        Self { hierarchy, engine }
    }

    pub async fn handle(&self) -> Result<HierarchyEvaluation, DomainError> {
        let config = self.hierarchy.current().await?;
        let evaluation = self.engine.evaluate(&config)?;

        log_consistency_warnings(&evaluation.consistency);
        debug!(
            criteria = evaluation.weights.len(),
            matrices = evaluation.consistency.matrices.len(),
            "Evaluated triage hierarchy"
        );
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{CriterionConfig, HierarchyConfig};
    use crate::domain::foundation::ErrorCode;
    use crate::ports::HierarchySourceError;
    use async_trait::async_trait;

    struct FixedHierarchy(HierarchyConfig);

    #[async_trait]
    impl HierarchyProvider for FixedHierarchy {
        async fn current(&self) -> Result<HierarchyConfig, HierarchySourceError> {
            Ok(self.0.clone())
        }
    }

    fn handler(config: HierarchyConfig) -> EvaluateHierarchyHandler {
        EvaluateHierarchyHandler::new(Arc::new(FixedHierarchy(config)), TriageEngine::standard())
    }

    #[tokio::test]
    async fn reports_inconsistent_matrices() {
        let config = HierarchyConfig {
            criteria: vec![
                CriterionConfig::leaf("airway", "Airway"),
                CriterionConfig::leaf("pulse_rate", "Pulse"),
                CriterionConfig::leaf("age", "Age"),
            ],
            comparisons: vec![
                vec![1.0, 9.0, 1.0 / 9.0],
                vec![1.0 / 9.0, 1.0, 9.0],
                vec![9.0, 1.0 / 9.0, 1.0],
            ],
        };
        let evaluation = handler(config).handle().await.unwrap();
        assert!(evaluation.consistency.any_inconsistent);
        assert_eq!(evaluation.weights.len(), 3);
    }

    #[tokio::test]
    async fn structural_errors_are_invalid_configuration() {
        let config = HierarchyConfig {
            criteria: vec![CriterionConfig::leaf("airway", "Airway")],
            comparisons: vec![vec![1.0, 2.0]],
        };
        let err = handler(config).handle().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfiguration);
    }
}
