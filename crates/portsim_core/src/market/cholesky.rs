//! Cholesky factor used to impose correlation on independent draws.
//!
//! The heuristic correlation matrix is not guaranteed positive semi-definite,
//! so each pivot is floored at `MIN_PIVOT` instead of failing.

use serde::{Deserialize, Serialize};

use super::correlation::CorrelationMatrix;

/// Floor applied to each diagonal pivot before the square root
pub const MIN_PIVOT: f64 = 1e-4;

/// Lower-triangular factor L with L * Lᵗ ≈ M, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CholeskyFactor {
    dim: usize,
    lower: Vec<f64>,
}

impl CholeskyFactor {
    /// Factor `matrix`
    #[must_use]
    pub fn decompose(matrix: &CorrelationMatrix) -> Self {
        let n = matrix.dim();
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let dot: f64 = (0..j).map(|k| lower[i * n + k] * lower[j * n + k]).sum();
                if i == j {
                    lower[i * n + i] = (matrix.get(i, i) - dot).max(MIN_PIVOT).sqrt();
                } else {
                    lower[i * n + j] = (matrix.get(i, j) - dot) / lower[j * n + j];
                }
            }
        }

        Self { dim: n, lower }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.lower[i * self.dim + j]
    }

    /// out = L * v
    pub fn apply(&self, v: &[f64], out: &mut [f64]) {
        debug_assert_eq!(v.len(), self.dim);
        debug_assert_eq!(out.len(), self.dim);
        for (i, o) in out.iter_mut().enumerate() {
            let row = &self.lower[i * self.dim..i * self.dim + i + 1];
            *o = row.iter().zip(v).map(|(l, x)| l * x).sum();
        }
    }

    /// L * Lᵗ, for verifying the factorization
    #[must_use]
    pub fn reconstruct(&self) -> CorrelationMatrix {
        let n = self.dim;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| (0..=i.min(j)).map(|k| self.get(i, k) * self.get(j, k)).sum())
                    .collect()
            })
            .collect();
        CorrelationMatrix::from_rows(&rows)
    }
}
