//! Consistency Checker - Consistency ratio of a pairwise comparison matrix.

use serde::{Deserialize, Serialize};

use super::PairwiseMatrix;

/// Maximum consistency ratio considered acceptable.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Published random consistency index for matrices of size 1..=10.
const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Random index RI(n). Sizes above 10 reuse RI(10).
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// Result of checking one matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub lambda_max: f64,
    pub ci: f64,
    pub cr: f64,
    pub consistent: bool,
}

/// Consistency checks for pairwise comparison matrices.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Computes λmax, CI and CR for a matrix and its derived weights.
    ///
    /// # Algorithm
    /// - `Aw[i] = Σ_j m[i][j] * w[j]`
    /// - `λmax = mean(Aw[i] / w[i])` over rows with `w[i] > 0`
    /// - `CI = (λmax - n) / (n - 1)` for n > 1, else 0
    /// - `CR = CI / RI(n)`, 0 when RI(n) is 0
    ///
    /// # Edge Cases
    /// - n < 3: always consistent
    /// - All weights zero: λmax taken as n (no evidence of inconsistency)
    pub fn check(matrix: &PairwiseMatrix, weights: &[f64]) -> ConsistencyResult {
        let n = matrix.size();

        let ratios: Vec<f64> = (0..n)
            .filter(|&i| weights.get(i).copied().unwrap_or(0.0) > 0.0)
            .map(|i| {
                let weighted_sum: f64 = (0..n)
                    .map(|j| matrix.get(i, j) * weights.get(j).copied().unwrap_or(0.0))
                    .sum();
                weighted_sum / weights[i]
            })
            .collect();

        let lambda_max = if ratios.is_empty() {
            n as f64
        } else {
            ratios.iter().sum::<f64>() / ratios.len() as f64
        };

        let ci = if n > 1 {
            (lambda_max - n as f64) / (n as f64 - 1.0)
        } else {
            0.0
        };

        let ri = random_index(n);
        let cr = if ri > 0.0 { ci / ri } else { 0.0 };

        ConsistencyResult {
            lambda_max,
            ci,
            cr,
            consistent: n < 3 || cr <= CONSISTENCY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::WeightDeriver;

    fn check(matrix: &PairwiseMatrix) -> ConsistencyResult {
        let weights = WeightDeriver::derive(matrix);
        ConsistencyChecker::check(matrix, &weights)
    }

    #[test]
    fn random_index_table() {
        assert_eq!(random_index(1), 0.0);
        assert_eq!(random_index(2), 0.0);
        assert_eq!(random_index(3), 0.58);
        assert_eq!(random_index(7), 1.32);
        assert_eq!(random_index(10), 1.49);
        assert_eq!(random_index(15), 1.49);
    }

    #[test]
    fn uniform_matrix_is_perfectly_consistent() {
        let result = check(&PairwiseMatrix::uniform(4));
        assert!((result.lambda_max - 4.0).abs() < 1e-9);
        assert!(result.cr.abs() < 1e-9);
        assert!(result.consistent);
    }

    #[test]
    fn cyclic_judgements_are_flagged() {
        // A >> B, B >> C, but C >> A
        let m = PairwiseMatrix::from_upper_triangle("m", 3, &[9.0, 1.0 / 9.0, 9.0]).unwrap();
        let result = check(&m);
        assert!(result.cr > CONSISTENCY_THRESHOLD);
        assert!(!result.consistent);
    }

    #[test]
    fn mildly_imperfect_judgements_pass() {
        // Classic textbook 3x3 with CR around 0.03
        let m = PairwiseMatrix::from_upper_triangle("m", 3, &[3.0, 5.0, 2.0]).unwrap();
        let result = check(&m);
        assert!(result.cr > 0.0);
        assert!(result.consistent);
    }

    #[test]
    fn small_matrices_are_exempt() {
        let contradictory = PairwiseMatrix::new("m", vec![vec![1.0, 9.0], vec![9.0, 1.0]]).unwrap();
        assert!(check(&contradictory).consistent);
        assert!(check(&PairwiseMatrix::uniform(1)).consistent);
        assert_eq!(check(&PairwiseMatrix::uniform(1)).ci, 0.0);
    }

    #[test]
    fn zero_weight_rows_are_skipped() {
        let m = PairwiseMatrix::uniform(3);
        let result = ConsistencyChecker::check(&m, &[0.5, 0.5, 0.0]);
        assert!(result.lambda_max.is_finite());
    }

    #[test]
    fn all_zero_weights_do_not_divide_by_zero() {
        let m = PairwiseMatrix::uniform(3);
        let result = ConsistencyChecker::check(&m, &[0.0, 0.0, 0.0]);
        assert_eq!(result.lambda_max, 3.0);
        assert_eq!(result.cr, 0.0);
    }
}
