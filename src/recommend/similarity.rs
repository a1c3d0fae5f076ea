//! Item-item cosine similarity over rating columns.
//!
//! Unrated cells count as real zeros, so items rated by overlapping users
//! score higher than items with disjoint audiences.

use super::config::DEFAULT_SIMILARITY_FALLBACK;
use crate::primitives::Matrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// Cosine similarity of two vectors.
///
/// Returns `fallback` when either vector has zero norm, so the result is
/// never NaN. Rounding is clamped to `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use recblend::recommend::cosine_similarity;
///
/// assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0], 0.0) - 1.0).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0], 0.0), 0.0);
/// ```
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64], fallback: f64) -> f64 {
    let norm_a = dot(a, a).sqrt();
    let norm_b = dot(b, b).sqrt();
    cosine_with_norms(a, b, norm_a, norm_b, fallback)
}

fn cosine_with_norms(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64, fallback: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return fallback;
    }
    let value = dot(a, b) / (norm_a * norm_b);
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        fallback
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Builds the symmetric item × item similarity matrix `S`.
///
/// # Examples
///
/// ```
/// use recblend::primitives::Matrix;
/// use recblend::recommend::ItemSimilarity;
///
/// // 2 users x 3 items; item 2 was never rated
/// let r = Matrix::from_vec(2, 3, vec![5.0, 5.0, 0.0, 1.0, 1.0, 0.0]).expect("2x3");
/// let s = ItemSimilarity::default().compute(&r);
///
/// assert_eq!(s.get(2, 2), 1.0);
/// assert!((s.get(0, 1) - 1.0).abs() < 1e-12);
/// assert_eq!(s.get(0, 2), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSimilarity {
    fallback: f64,
}

impl Default for ItemSimilarity {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_FALLBACK)
    }
}

impl ItemSimilarity {
    /// Creates a computer with the given zero-vector fallback.
    #[must_use]
    pub fn new(fallback: f64) -> Self {
        Self { fallback }
    }

    /// Similarity used for never-rated items.
    #[must_use]
    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Computes `S` from the columns of `ratings`.
    ///
    /// The diagonal is exactly 1. Each unordered pair is computed once and
    /// mirrored, so `S[i][j] == S[j][i]` bit for bit.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(items = ratings.n_cols()))]
    pub fn compute(&self, ratings: &Matrix<f64>) -> Matrix<f64> {
        let n = ratings.n_cols();
        let columns = ratings.transpose();
        let norms: Vec<f64> = (0..n)
            .map(|i| dot(columns.row_slice(i), columns.row_slice(i)).sqrt())
            .collect();

        let upper_row = |i: usize| -> Vec<f64> {
            ((i + 1)..n)
                .map(|j| {
                    cosine_with_norms(
                        columns.row_slice(i),
                        columns.row_slice(j),
                        norms[i],
                        norms[j],
                        self.fallback,
                    )
                })
                .collect()
        };

        #[cfg(feature = "parallel")]
        let upper: Vec<Vec<f64>> = (0..n).into_par_iter().map(upper_row).collect();
        #[cfg(not(feature = "parallel"))]
        let upper: Vec<Vec<f64>> = (0..n).map(upper_row).collect();

        let mut sim = Matrix::eye(n);
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                sim.set(i, j, value);
                sim.set(j, i, value);
            }
        }
        sim
    }
}
