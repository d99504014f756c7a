//! Patient module - Casualty records and derived clinical indices.

mod record;
mod vitals;

pub use record::{AirwayStatus, BloodPressure, GcsComponents, PatientRecord, PatientRecordBuilder};
pub use vitals::{
    coded_gcs, coded_respiratory_rate, coded_systolic, resolve_age, revised_trauma_score,
    ClinicalSummary, RTS_MAX,
};
