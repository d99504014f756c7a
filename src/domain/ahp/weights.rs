//! Weight Deriver - Column-normalization approximation of the principal eigenvector.

use super::PairwiseMatrix;

/// Derives normalized priority weights from a pairwise comparison matrix.
pub struct WeightDeriver;

impl WeightDeriver {
    /// Computes the weight vector for a matrix.
    ///
    /// # Algorithm
    /// 1. Sum each column
    /// 2. Divide every entry by its column sum
    /// 3. Weight of row i = mean of normalized row i
    ///
    /// # Edge Cases
    /// - 1x1 matrix: Returns `[1.0]`
    /// - Column summing to exactly 0: its normalized entries count as 0,
    ///   so an all-zero matrix yields all-zero weights
    pub fn derive(matrix: &PairwiseMatrix) -> Vec<f64> {
        let n = matrix.size();
        if n == 1 {
            return vec![1.0];
        }

        let column_sums: Vec<f64> = (0..n)
            .map(|j| (0..n).map(|i| matrix.get(i, j)).sum())
            .collect();

        (0..n)
            .map(|i| {
                let row_total: f64 = (0..n)
                    .map(|j| {
                        if column_sums[j] == 0.0 {
                            0.0
                        } else {
                            matrix.get(i, j) / column_sums[j]
                        }
                    })
                    .sum();
                row_total / n as f64
            })
            .collect()
    }

    /// Returns true if every weight is zero.
    pub fn is_degenerate(weights: &[f64]) -> bool {
        weights.iter().all(|w| *w == 0.0)
    }
}
