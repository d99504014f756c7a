//! Configuration errors that abort a prioritization run.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors in the criterion hierarchy or scoring registry.
///
/// Any of these refuses the whole run. Ranking with a silently defaulted
/// score could misorder patients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("No scoring rule registered for leaf criterion '{criterion_id}'")]
    MissingScoringRule { criterion_id: String },

    #[error("Comparison matrix '{matrix_id}' is empty")]
    EmptyMatrix { matrix_id: String },

    #[error("Comparison matrix '{matrix_id}' is not square: row {row} has {actual} entries, expected {expected}")]
    NonSquareMatrix {
        matrix_id: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Comparison matrix '{matrix_id}' has non-positive entry {value} at ({row}, {col})")]
    NonPositiveEntry {
        matrix_id: String,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("Comparison matrix '{matrix_id}' expects {expected} upper-triangle judgements, got {actual}")]
    InvalidJudgementCount {
        matrix_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Comparison matrix '{matrix_id}' is {actual}x{actual} but compares {expected} criteria")]
    MatrixSizeMismatch {
        matrix_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Criterion '{criterion_id}' has sub-criteria but no comparison matrix")]
    MissingMatrix { criterion_id: String },

    #[error("Criterion '{criterion_id}' is a leaf but carries a comparison matrix")]
    UnexpectedMatrix { criterion_id: String },

    #[error("Criterion id '{criterion_id}' is used more than once")]
    DuplicateCriterion { criterion_id: String },

    #[error("Criterion id cannot be empty")]
    EmptyCriterionId,

    #[error("Criterion '{criterion_id}' exceeds the maximum hierarchy depth of {max_depth}")]
    HierarchyTooDeep {
        criterion_id: String,
        max_depth: usize,
    },

    #[error("Hierarchy has no criteria")]
    EmptyHierarchy,

    #[error("Comparison matrix '{matrix_id}' produced all-zero weights")]
    DegenerateWeights { matrix_id: String },
}

impl ConfigurationError {
    /// Returns the criterion or matrix id the error refers to, if any.
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            ConfigurationError::MissingScoringRule { criterion_id }
            | ConfigurationError::MissingMatrix { criterion_id }
            | ConfigurationError::UnexpectedMatrix { criterion_id }
            | ConfigurationError::DuplicateCriterion { criterion_id }
            | ConfigurationError::HierarchyTooDeep { criterion_id, .. } => Some(criterion_id),
            ConfigurationError::EmptyMatrix { matrix_id }
            | ConfigurationError::NonSquareMatrix { matrix_id, .. }
            | ConfigurationError::NonPositiveEntry { matrix_id, .. }
            | ConfigurationError::InvalidJudgementCount { matrix_id, .. }
            | ConfigurationError::MatrixSizeMismatch { matrix_id, .. }
            | ConfigurationError::DegenerateWeights { matrix_id } => Some(matrix_id),
            ConfigurationError::EmptyCriterionId | ConfigurationError::EmptyHierarchy => None,
        }
    }
}

impl From<ConfigurationError> for DomainError {
    fn from(err: ConfigurationError) -> Self {
        let subject = err.subject_id().map(str::to_string);
        let domain = DomainError::new(ErrorCode::InvalidConfiguration, err.to_string());
        match subject {
            Some(id) => domain.with_detail("criterion_id", id),
            None => domain,
        }
    }
}
