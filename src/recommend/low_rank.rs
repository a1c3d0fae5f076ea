//! Low-rank reconstruction of the rating matrix.

use super::config::RankPolicy;
use crate::decomposition::Svd;
use crate::error::Result;
use crate::primitives::Matrix;
use tracing::{debug, instrument};

/// Predicts ratings by truncated SVD reconstruction.
///
/// The output has the shape of the input and is not clamped to the rating
/// scale.
///
/// # Examples
///
/// ```
/// use recblend::primitives::Matrix;
/// use recblend::recommend::{LowRankApproximator, RankPolicy};
///
/// let r = Matrix::from_vec(2, 3, vec![5.0, 4.0, 0.0, 4.0, 0.0, 5.0]).expect("2x3");
///
/// let full = LowRankApproximator::new(RankPolicy::Full).approximate(&r).expect("converges");
/// assert!(full.max_abs_diff(&r).expect("same shape") < 1e-9);
///
/// let rank1 = LowRankApproximator::new(RankPolicy::Fixed(1)).approximate(&r).expect("converges");
/// assert!(rank1.get(0, 2) > 0.0); // the unrated cell now carries a prediction
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LowRankApproximator {
    policy: RankPolicy,
}

impl LowRankApproximator {
    /// Creates an approximator with the given rank policy.
    #[must_use]
    pub fn new(policy: RankPolicy) -> Self {
        Self { policy }
    }

    /// The configured rank policy.
    #[must_use]
    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    /// Number of components the policy keeps for this decomposition.
    #[must_use]
    pub fn select_rank(&self, svd: &Svd) -> usize {
        let available = svd.singular_values().len();
        match self.policy {
            RankPolicy::Full => available,
            RankPolicy::Fixed(k) => k.min(available),
            RankPolicy::Energy(fraction) => svd.rank_for_energy(fraction),
        }
    }

    /// Computes the predicted matrix `P`.
    ///
    /// Empty and all-zero inputs give an all-zero `P` of the same shape.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::RecommendError::ConvergenceFailure`] from
    /// the decomposition.
    #[instrument(level = "debug", skip(self, ratings), fields(policy = %self.policy))]
    pub fn approximate(&self, ratings: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (rows, cols) = ratings.shape();
        if rows == 0 || cols == 0 {
            return Ok(Matrix::zeros(rows, cols));
        }

        let svd = Svd::compute(ratings)?;
        let rank = self.select_rank(&svd);
        debug!(
            rank,
            available = svd.singular_values().len(),
            "reconstructing from leading singular components"
        );
        Ok(svd.reconstruct(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Matrix<f64> {
        Matrix::from_vec(2, 3, vec![5.0, 4.0, 0.0, 4.0, 0.0, 5.0]).expect("2x3")
    }

    #[test]
    fn test_full_policy_reproduces_ratings() {
        let r = scenario();
        let p = LowRankApproximator::new(RankPolicy::Full)
            .approximate(&r)
            .expect("converges");
        assert!(p.max_abs_diff(&r).expect("same shape") < 1e-9);
    }

    #[test]
    fn test_fixed_policy_clamped() {
        let r = scenario();
        let svd = Svd::compute(&r).expect("converges");
        assert_eq!(LowRankApproximator::new(RankPolicy::Fixed(9)).select_rank(&svd), 2);
        assert_eq!(LowRankApproximator::new(RankPolicy::Fixed(1)).select_rank(&svd), 1);
    }

    #[test]
    fn test_energy_policy() {
        let r = scenario();
        let svd = Svd::compute(&r).expect("converges");
        let full = LowRankApproximator::new(RankPolicy::Energy(1.0)).select_rank(&svd);
        assert_eq!(full, 2);
        let low = LowRankApproximator::new(RankPolicy::Energy(0.1)).select_rank(&svd);
        assert_eq!(low, 1);
    }

    #[test]
    fn test_default_policy_is_energy() {
        assert_eq!(
            LowRankApproximator::default().policy(),
            RankPolicy::Energy(0.9)
        );
    }

    #[test]
    fn test_degenerate_shapes() {
        let approx = LowRankApproximator::default();
        assert_eq!(
            approx.approximate(&Matrix::zeros(0, 4)).expect("empty"),
            Matrix::zeros(0, 4)
        );
        assert_eq!(
            approx.approximate(&Matrix::zeros(3, 0)).expect("empty"),
            Matrix::zeros(3, 0)
        );
        assert_eq!(
            approx.approximate(&Matrix::zeros(2, 2)).expect("all zero"),
            Matrix::zeros(2, 2)
        );
    }

    #[test]
    fn test_truncation_fills_unrated_cells() {
        let r = scenario();
        let p = LowRankApproximator::new(RankPolicy::Fixed(1))
            .approximate(&r)
            .expect("converges");
        assert!(p.is_finite());
        assert!(p.get(0, 2).abs() > 1e-6);
        assert!(p.get(1, 1).abs() > 1e-6);
    }
}
