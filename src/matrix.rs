//! Square matrix generation and principal-diagonal summation.

use rand::RngExt;
use rand::rngs::StdRng;

use crate::types::{Element, RunError};

/// An n×n matrix of integers, immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<Element>>,
}

impl Matrix {
    /// Generate a `side`×`side` matrix with every cell drawn independently
    /// from `lo..=hi` using the caller's seeded source. The same seed and
    /// call sequence reproduce the matrix bit-for-bit.
    pub fn generate(
        side: usize,
        lo: Element,
        hi: Element,
        rng: &mut StdRng,
    ) -> Result<Self, RunError> {
        if side < 1 {
            return Err(RunError::invalid(format!(
                "matrix side must be at least 1 (got {side})"
            )));
        }
        if lo > hi {
            return Err(RunError::invalid(format!(
                "value range is empty ({lo} > {hi})"
            )));
        }
        let rows = (0..side)
            .map(|_| (0..side).map(|_| rng.random_range(lo..=hi)).collect())
            .collect();
        Ok(Self { rows })
    }

    /// Wrap pre-built rows without validating their shape. Squareness is
    /// checked where it matters, in [`Matrix::diagonal_sum`].
    pub fn from_rows(rows: Vec<Vec<Element>>) -> Self {
        Self { rows }
    }

    /// Number of rows; for a square matrix this is also the column count.
    pub fn side(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Element>] {
        &self.rows
    }

    /// Sum of the cells where row index equals column index. An empty
    /// matrix sums to 0; a non-square matrix is rejected.
    pub fn diagonal_sum(&self) -> Result<Element, RunError> {
        let side = self.rows.len();
        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != side {
                return Err(RunError::invalid(format!(
                    "matrix is not square: row {} has {} columns, expected {side}",
                    index + 1,
                    row.len()
                )));
            }
        }
        Ok(self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| row[index])
            .sum())
    }
}
