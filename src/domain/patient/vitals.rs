//! Derived clinical indices - GCS total, Revised Trauma Score, resolved age.
//!
//! These are display values attached to each scored patient. They do not feed
//! the priority computation except through the scoring rules that read the
//! same raw fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PatientRecord;

/// Coefficient applied to the coded GCS value in the RTS.
const RTS_GCS_COEFFICIENT: f64 = 0.9368;
/// Coefficient applied to the coded systolic pressure in the RTS.
const RTS_SBP_COEFFICIENT: f64 = 0.7326;
/// Coefficient applied to the coded respiratory rate in the RTS.
const RTS_RR_COEFFICIENT: f64 = 0.2908;

/// Maximum achievable Revised Trauma Score (all coded values = 4).
pub const RTS_MAX: f64 = 7.8408;

/// Summary indices shown alongside a patient's priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalSummary {
    pub gcs_total: Option<u8>,
    pub revised_trauma_score: Option<f64>,
    pub age_years: Option<u32>,
}

impl ClinicalSummary {
    /// Computes the summary for a record as of the given date.
    pub fn for_record(record: &PatientRecord, reference_date: Option<NaiveDate>) -> Self {
        Self {
            gcs_total: record.gcs.total(),
            revised_trauma_score: revised_trauma_score(record),
            age_years: resolve_age(record, reference_date),
        }
    }
}

/// Revised Trauma Score from GCS total, systolic BP and respiratory rate.
///
/// Returns `None` unless all three inputs are documented.
pub fn revised_trauma_score(record: &PatientRecord) -> Option<f64> {
    let gcs = coded_gcs(record.gcs.total()?);
    let sbp = coded_systolic(record.systolic_bp()?);
    let rr = coded_respiratory_rate(record.respiratory_rate?);

    Some(
        RTS_GCS_COEFFICIENT * gcs as f64
            + RTS_SBP_COEFFICIENT * sbp as f64
            + RTS_RR_COEFFICIENT * rr as f64,
    )
}

/// Coded GCS value (0-4).
pub fn coded_gcs(total: u8) -> u8 {
    match total {
        13..=15 => 4,
        9..=12 => 3,
        6..=8 => 2,
        4..=5 => 1,
        _ => 0,
    }
}

/// Coded systolic pressure value (0-4).
pub fn coded_systolic(systolic: u32) -> u8 {
    match systolic {
        0 => 0,
        1..=49 => 1,
        50..=75 => 2,
        76..=89 => 3,
        _ => 4,
    }
}

/// Coded respiratory rate value (0-4).
pub fn coded_respiratory_rate(rate: u32) -> u8 {
    match rate {
        0 => 0,
        1..=5 => 1,
        6..=9 => 2,
        10..=29 => 4,
        _ => 3,
    }
}

/// Age in whole years: explicit age first, otherwise derived from date of birth.
///
/// A date of birth after the reference date yields `None`.
pub fn resolve_age(record: &PatientRecord, reference_date: Option<NaiveDate>) -> Option<u32> {
    if let Some(age) = record.age_years {
        return Some(age);
    }
    let dob = record.date_of_birth?;
    reference_date?.years_since(dob)
}
