//! Pairwise Matrix - Relative-importance ratios between a set of items.

use serde::Serialize;

use super::ConfigurationError;

/// Tolerance used when checking the reciprocal property.
const RECIPROCAL_TOLERANCE: f64 = 1e-6;

/// Square matrix where `m[i][j]` says item i is `m[i][j]` times as important as item j.
///
/// Construction guarantees a non-empty square matrix of finite positive
/// entries. The reciprocal property is not enforced; see [`is_reciprocal`].
///
/// [`is_reciprocal`]: PairwiseMatrix::is_reciprocal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PairwiseMatrix {
    rows: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    /// Creates a matrix from rows, validating shape and entries.
    ///
    /// `matrix_id` is only used to label errors.
    pub fn new(matrix_id: &str, rows: Vec<Vec<f64>>) -> Result<Self, ConfigurationError> {
        let n = rows.len();
        if n == 0 {
            return Err(ConfigurationError::EmptyMatrix {
                matrix_id: matrix_id.to_string(),
            });
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(ConfigurationError::NonSquareMatrix {
                    matrix_id: matrix_id.to_string(),
                    row: i,
                    expected: n,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigurationError::NonPositiveEntry {
                        matrix_id: matrix_id.to_string(),
                        row: i,
                        col: j,
                        value,
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Builds a reciprocal matrix from the judgements above the diagonal.
    ///
    /// Judgements are given row by row: `m[0][1], m[0][2], .., m[1][2], ..`.
    /// The diagonal is 1 and `m[j][i] = 1 / m[i][j]`.
    pub fn from_upper_triangle(
        matrix_id: &str,
        size: usize,
        judgements: &[f64],
    ) -> Result<Self, ConfigurationError> {
        let expected = size * size.saturating_sub(1) / 2;
        if judgements.len() != expected {
            return Err(ConfigurationError::InvalidJudgementCount {
                matrix_id: matrix_id.to_string(),
                expected,
                actual: judgements.len(),
            });
        }

        let mut rows = vec![vec![1.0; size]; size];
        let mut next = judgements.iter();
        for i in 0..size {
            for j in (i + 1)..size {
                // Length checked above.
                let value = next.next().copied().unwrap_or(1.0);
                rows[i][j] = value;
                rows[j][i] = 1.0 / value;
            }
        }

        Self::new(matrix_id, rows)
    }

    /// Matrix of all ones: every item equally important.
    pub fn uniform(size: usize) -> Self {
        Self {
            rows: vec![vec![1.0; size.max(1)]; size.max(1)],
        }
    }

    /// Number of items compared.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Row-major view of the entries.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns true if the diagonal is 1 and `m[i][j] * m[j][i] == 1` within tolerance.
    pub fn is_reciprocal(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| {
            (self.rows[i][i] - 1.0).abs() <= RECIPROCAL_TOLERANCE
                && ((i + 1)..n)
                    .all(|j| (self.rows[i][j] * self.rows[j][i] - 1.0).abs() <= RECIPROCAL_TOLERANCE)
        })
    }
}
