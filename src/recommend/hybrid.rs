//! Hybrid scoring and top-N ranking.
//!
//! For a user row `u` and every unrated item `j`:
//!
//! ```text
//! base(j)         = P[u][j]
//! neighborhood(j) = mean over rated k of S[j][k] * R[u][k]
//! score(j)        = w_p * base(j) + w_n * neighborhood(j)   (user rated something)
//!                 = base(j)                                 (otherwise)
//! ```

use super::config::{validate_top_n, BlendWeights};
use super::rating_matrix::RatingMatrix;
use super::types::Recommendation;
use crate::error::{RecommendError, Result};
use crate::primitives::Matrix;

/// Blends predicted and neighborhood signals and ranks candidates.
///
/// Holds no per-request state; one scorer can serve any number of users
/// concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HybridScorer {
    weights: BlendWeights,
}

impl HybridScorer {
    /// Creates a scorer with the given blend weights.
    #[must_use]
    pub fn new(weights: BlendWeights) -> Self {
        Self { weights }
    }

    /// The blend weights in use.
    #[must_use]
    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    /// Resolves `user_id`, scores its unrated items and keeps the best `top_n`.
    ///
    /// # Errors
    ///
    /// - [`RecommendError::UserNotFound`] if the user has no row
    /// - [`RecommendError::InvalidHyperparameter`] if `top_n` is zero
    /// - [`RecommendError::DimensionMismatch`] if `P` or `S` do not match `R`
    pub fn recommend(
        &self,
        ratings: &RatingMatrix,
        predicted: &Matrix<f64>,
        similarity: &Matrix<f64>,
        user_id: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        validate_top_n(top_n)?;
        check_shapes(ratings.matrix(), predicted, similarity)?;
        let row = ratings
            .user_row(user_id)
            .ok_or_else(|| RecommendError::user_not_found(user_id))?;

        let candidates = self.score_candidates(
            ratings.matrix().row_slice(row),
            predicted.row_slice(row),
            similarity,
            ratings.item_ids(),
        );
        Ok(rank(candidates, top_n))
    }

    /// Scores every unrated item of one user, in item order.
    ///
    /// `user_ratings` and `user_predictions` are the user's rows of `R`
    /// and `P`; `item_ids` names the columns.
    #[must_use]
    pub fn score_candidates(
        &self,
        user_ratings: &[f64],
        user_predictions: &[f64],
        similarity: &Matrix<f64>,
        item_ids: &[String],
    ) -> Vec<Recommendation> {
        let rated: Vec<(usize, f64)> = user_ratings
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, r)| r > 0.0)
            .collect();

        user_ratings
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r == 0.0)
            .map(|(j, _)| {
                let base = user_predictions[j];
                let score = match neighborhood_average(similarity.row_slice(j), &rated) {
                    Some(neighborhood) => self.weights.blend(base, neighborhood),
                    None => base,
                };
                Recommendation {
                    item_id: item_ids[j].clone(),
                    score,
                }
            })
            .collect()
    }
}

/// Mean of `S[j][k] * R[u][k]` over the rated items `k`; `None` if the user
/// rated nothing.
#[must_use]
pub fn neighborhood_average(similarity_row: &[f64], rated: &[(usize, f64)]) -> Option<f64> {
    if rated.is_empty() {
        return None;
    }
    let total: f64 = rated
        .iter()
        .map(|&(k, rating)| similarity_row[k] * rating)
        .sum();
    Some(total / rated.len() as f64)
}

/// Sorts by descending score and keeps the first `top_n`.
///
/// The sort is stable, so equal scores keep their item order.
///
/// # Examples
///
/// ```
/// use recblend::recommend::{rank, Recommendation};
///
/// let rec = |id: &str, score: f64| Recommendation { item_id: id.to_string(), score };
/// let ranked = rank(vec![rec("a", 1.0), rec("b", 3.0), rec("c", 1.0)], 2);
///
/// assert_eq!(ranked[0].item_id, "b");
/// assert_eq!(ranked[1].item_id, "a");
/// assert_eq!(ranked.len(), 2);
/// ```
#[must_use]
pub fn rank(mut candidates: Vec<Recommendation>, top_n: usize) -> Vec<Recommendation> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(top_n);
    candidates
}

fn check_shapes(ratings: &Matrix<f64>, predicted: &Matrix<f64>, similarity: &Matrix<f64>) -> Result<()> {
    let (users, items) = ratings.shape();
    if predicted.shape() != (users, items) {
        return Err(RecommendError::DimensionMismatch {
            expected: format!("predicted {users}x{items}"),
            actual: format!("{}x{}", predicted.n_rows(), predicted.n_cols()),
        });
    }
    if similarity.shape() != (items, items) {
        return Err(RecommendError::DimensionMismatch {
            expected: format!("similarity {items}x{items}"),
            actual: format!("{}x{}", similarity.n_rows(), similarity.n_cols()),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "hybrid_tests.rs"]
mod tests;
