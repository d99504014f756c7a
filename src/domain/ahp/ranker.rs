//! Ranker - Orders scored patients by descending global priority.

use super::ScoredPatient;

/// Ranking of scored patients within one triage category.
pub struct Ranker;

impl Ranker {
    /// Sorts by descending global priority and assigns ranks 1..N.
    ///
    /// Exact ties keep their input order.
    pub fn rank(mut patients: Vec<ScoredPatient>) -> Vec<ScoredPatient> {
        // sort_by is stable
        patients.sort_by(|a, b| b.global_priority.total_cmp(&a.global_priority));

        for (position, patient) in patients.iter_mut().enumerate() {
            patient.rank = Some(position as u32 + 1);
        }
        patients
    }
}
