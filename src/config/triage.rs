//! Triage engine configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Upper bound accepted for `max_patients_per_run`.
pub const PATIENT_LIMIT_CEILING: usize = 10_000;

/// Triage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TriageConfig {
    /// YAML hierarchy file. The built-in hierarchy is used when unset.
    #[serde(default)]
    pub hierarchy_path: Option<PathBuf>,

    /// Largest number of patients accepted by a single ranking run
    #[serde(default = "default_max_patients_per_run")]
    pub max_patients_per_run: usize,
}

impl TriageConfig {
    /// Validate triage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_patients_per_run == 0 || self.max_patients_per_run > PATIENT_LIMIT_CEILING {
            return Err(ValidationError::InvalidPatientLimit(PATIENT_LIMIT_CEILING));
        }
        if let Some(path) = &self.hierarchy_path {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::EmptyHierarchyPath);
            }
        }
        Ok(())
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            hierarchy_path: None,
            max_patients_per_run: default_max_patients_per_run(),
        }
    }
}

fn default_max_patients_per_run() -> usize {
    500
}
