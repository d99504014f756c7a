//! RankPatientsHandler - Stateless ranking of caller-supplied patients.
//!
//! Also hosts the run helper shared with `RankCategoryHandler`: size guard,
//! reference date resolution, engine call and consistency logging.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::ahp::{ConsistencyReport, HierarchyConfig, ScoringContext, TriageEngine, TriageRanking};
use crate::domain::foundation::{DomainError, ErrorCode, TriageCategory};
use crate::domain::patient::PatientRecord;
use crate::ports::HierarchyProvider;

/// Command to rank an explicit list of patients.
#[derive(Debug, Clone)]
pub struct RankPatientsCommand {
    pub category: TriageCategory,
    /// Records of any category; only those matching `category` are ranked.
    pub patients: Vec<PatientRecord>,
    /// Overrides the configured hierarchy for this run only.
    pub hierarchy: Option<HierarchyConfig>,
    /// Date used for age calculation. Defaults to today (UTC).
    pub reference_date: Option<NaiveDate>,
}

/// Result of a stateless ranking run.
pub type RankPatientsResult = TriageRanking;

/// Handler for ranking caller-supplied patients.
pub struct RankPatientsHandler {
    hierarchy: Arc<dyn HierarchyProvider>,
    engine: TriageEngine,
    max_patients: usize,
}

impl RankPatientsHandler {
    pub fn new(hierarchy: Arc<dyn HierarchyProvider>, engine: TriageEngine, max_patients: usize) -> Self {
        Self {
            hierarchy,
            engine,
            max_patients,
        }
    }

    pub async fn handle(&self, cmd: RankPatientsCommand) -> Result<RankPatientsResult, DomainError> {
        for record in &cmd.patients {
            validate_supplied(record)?;
        }

        let config = match cmd.hierarchy {
            Some(config) => config,
            None => self.hierarchy.current().await?,
        };

        run_ranking(
            &self.engine,
            cmd.category,
            &cmd.patients,
            &config,
            cmd.reference_date,
            self.max_patients,
        )
    }
}

/// Rejects a supplied record whose fields fail validation.
fn validate_supplied(record: &PatientRecord) -> Result<(), DomainError> {
    record.validate().map_err(|err| {
        warn!(patient_id = %record.id.as_str(), error = %err, "Rejected supplied patient record");
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("Patient '{}': {}", record.id.as_str(), err),
        )
        .with_detail("patient_id", record.id.as_str())
    })
}

/// Runs the engine once, logging the outcome.
pub(super) fn run_ranking(
    engine: &TriageEngine,
    category: TriageCategory,
    patients: &[PatientRecord],
    config: &HierarchyConfig,
    reference_date: Option<NaiveDate>,
    max_patients: usize,
) -> Result<TriageRanking, DomainError> {
    if patients.len() > max_patients {
        return Err(DomainError::new(
            ErrorCode::TooManyPatients,
            format!(
                "{} patients exceed the limit of {} per ranking run",
                patients.len(),
                max_patients
            ),
        )
        .with_detail("limit", max_patients.to_string()));
    }

    let reference_date = reference_date.unwrap_or_else(|| Utc::now().date_naive());
    let ctx = ScoringContext::as_of(reference_date);

    let ranking = engine.rank_patients(category, patients, config, &ctx).map_err(|err| {
        warn!(%category, error = %err, "Rejected triage hierarchy");
        DomainError::from(err)
    })?;

    log_consistency_warnings(&ranking.consistency);
    info!(
        %category,
        ranked = ranking.ranked_patients.len(),
        excluded = ranking.excluded_count,
        %reference_date,
        "Ranked triage category"
    );

    Ok(ranking)
}

/// Emits one warning per matrix whose CR exceeds the threshold.
pub(super) fn log_consistency_warnings(report: &ConsistencyReport) {
    for matrix in report.inconsistent() {
        warn!(
            matrix_id = %matrix.matrix_id,
            cr = matrix.cr,
            threshold = report.threshold,
            "Inconsistent pairwise comparisons"
        );
    }
    for matrix in report.matrices.iter().filter(|m| !m.reciprocal) {
        warn!(matrix_id = %matrix.matrix_id, "Pairwise comparisons are not reciprocal");
    }
}
