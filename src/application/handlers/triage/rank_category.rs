//! RankCategoryHandler - Query handler ranking the stored patients of one category.

use std::sync::Arc;

use chrono::NaiveDate;

use super::rank_patients::run_ranking;
use crate::domain::ahp::{TriageEngine, TriageRanking};
use crate::domain::foundation::{DomainError, TriageCategory};
use crate::ports::{HierarchyProvider, PatientReader};

/// Query to rank one triage category from the patient store.
#[derive(Debug, Clone)]
pub struct RankCategoryQuery {
    pub category: TriageCategory,
    /// Date used for age calculation. Defaults to today (UTC).
    pub reference_date: Option<NaiveDate>,
}

/// Result of a category ranking.
pub type RankCategoryResult = TriageRanking;

/// Handler for ranking stored patients.
pub struct RankCategoryHandler {
    reader: Arc<dyn PatientReader>,
    hierarchy: Arc<dyn HierarchyProvider>,
    engine: TriageEngine,
    max_patients: usize,
}

impl RankCategoryHandler {
    pub fn new(
        reader: Arc<dyn PatientReader>,
        hierarchy: Arc<dyn HierarchyProvider>,
        engine: TriageEngine,
        max_patients: usize,
    ) -> Self {
        Self {
            reader,
            hierarchy,
            engine,
            max_patients,
        }
    }

    pub async fn handle(&self, query: RankCategoryQuery) -> Result<RankCategoryResult, DomainError> {
        let config = self.hierarchy.current().await?;
        let patients = self.reader.list_by_category(query.category).await?;

        run_ranking(
            &self.engine,
            query.category,
            &patients,
            &config,
            query.reference_date,
            self.max_patients,
        )
    }
}
