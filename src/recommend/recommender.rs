//! Request-scoped entry point tying the four stages together.

use super::config::{validate_top_n, RecommenderConfig};
use super::hybrid::HybridScorer;
use super::low_rank::LowRankApproximator;
use super::rating_matrix::RatingMatrix;
use super::similarity::ItemSimilarity;
use super::types::{Item, Rating, Recommendation, User};
use crate::error::{RecommendError, Result};
use crate::primitives::Matrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Hybrid SVD + item-similarity recommender.
///
/// Every call rebuilds `R`, `P` and `S` from the supplied collections; the
/// recommender itself only carries configuration.
///
/// # Examples
///
/// ```
/// use recblend::recommend::{HybridRecommender, Item, Rating, User};
///
/// let users = vec![User::new("u1"), User::new("u2")];
/// let items = vec![
///     Item::new("i1", "The Matrix"),
///     Item::new("i2", "Inception"),
///     Item::new("i3", "Interstellar"),
/// ];
/// let ratings = vec![
///     Rating::new("u1", "i1", 5).expect("valid"),
///     Rating::new("u1", "i2", 4).expect("valid"),
///     Rating::new("u2", "i1", 4).expect("valid"),
///     Rating::new("u2", "i3", 5).expect("valid"),
/// ];
///
/// let recommender = HybridRecommender::default();
/// let recs = recommender
///     .recommend_top_n("u1", &users, &items, &ratings, 2)
///     .expect("u1 is known");
///
/// assert_eq!(recs.len(), 1);
/// assert_eq!(recs[0].item_id, "i3");
/// assert!(recs[0].score.is_finite());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HybridRecommender {
    config: RecommenderConfig,
}

/// `R`, `P`, `S` and the index maps for one invocation.
struct Snapshot {
    ratings: RatingMatrix,
    predicted: Matrix<f64>,
    similarity: Matrix<f64>,
}

impl HybridRecommender {
    /// Creates a recommender after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidHyperparameter`] for a bad config.
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommends up to `config.top_n` unrated items for `user_id`.
    ///
    /// # Errors
    ///
    /// See [`HybridRecommender::recommend_top_n`].
    pub fn recommend(
        &self,
        user_id: &str,
        users: &[User],
        items: &[Item],
        ratings: &[Rating],
    ) -> Result<Vec<Recommendation>> {
        self.recommend_top_n(user_id, users, items, ratings, self.config.top_n)
    }

    /// Recommends up to `top_n` unrated items for `user_id`.
    ///
    /// # Errors
    ///
    /// - [`RecommendError::UserNotFound`] if `user_id` is not among `users`
    /// - [`RecommendError::InvalidHyperparameter`] if `top_n` is zero
    /// - [`RecommendError::DimensionLimitExceeded`] above the size guard
    /// - [`RecommendError::ConvergenceFailure`] from the decomposition
    #[instrument(
        level = "debug",
        skip(self, users, items, ratings),
        fields(users = users.len(), items = items.len(), ratings = ratings.len())
    )]
    pub fn recommend_top_n(
        &self,
        user_id: &str,
        users: &[User],
        items: &[Item],
        ratings: &[Rating],
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        validate_top_n(top_n)?;
        self.config.limits.check(users.len(), items.len())?;

        let matrix = RatingMatrix::build(users, items, ratings);
        // Fail before the decomposition when the target is unknown.
        if matrix.user_row(user_id).is_none() {
            return Err(RecommendError::user_not_found(user_id));
        }

        let snapshot = self.complete(matrix)?;
        let recs = self.scorer().recommend(
            &snapshot.ratings,
            &snapshot.predicted,
            &snapshot.similarity,
            user_id,
            top_n,
        )?;
        debug!(returned = recs.len(), "recommendations ranked");
        Ok(recs)
    }

    /// Recommends for several users against one snapshot of the inputs.
    ///
    /// The outer error covers failures shared by every user (configuration,
    /// size guard, decomposition). Each inner result is that user's outcome,
    /// in the order of `user_ids`.
    ///
    /// # Errors
    ///
    /// See [`HybridRecommender::recommend_top_n`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(targets = user_ids.len(), users = users.len(), items = items.len())
    )]
    pub fn recommend_many<S: AsRef<str> + Sync>(
        &self,
        user_ids: &[S],
        users: &[User],
        items: &[Item],
        ratings: &[Rating],
        top_n: usize,
    ) -> Result<Vec<Result<Vec<Recommendation>>>> {
        validate_top_n(top_n)?;
        self.config.limits.check(users.len(), items.len())?;

        let snapshot = self.complete(RatingMatrix::build(users, items, ratings))?;
        let scorer = self.scorer();
        let score_one = |user_id: &S| {
            scorer.recommend(
                &snapshot.ratings,
                &snapshot.predicted,
                &snapshot.similarity,
                user_id.as_ref(),
                top_n,
            )
        };

        #[cfg(feature = "parallel")]
        let results = user_ids.par_iter().map(score_one).collect();
        #[cfg(not(feature = "parallel"))]
        let results = user_ids.iter().map(score_one).collect();

        Ok(results)
    }

    fn scorer(&self) -> HybridScorer {
        HybridScorer::new(self.config.blend)
    }

    /// Runs factorization and similarity, concurrently when possible.
    fn complete(&self, ratings: RatingMatrix) -> Result<Snapshot> {
        let approximator = LowRankApproximator::new(self.config.rank);
        let similarity = ItemSimilarity::new(self.config.similarity_fallback);

        let r = ratings.matrix();
        let (predicted, similarity) =
            join(|| approximator.approximate(r), || similarity.compute(r));

        Ok(Snapshot {
            predicted: predicted?,
            similarity,
            ratings,
        })
    }
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}

#[cfg(test)]
#[path = "recommender_tests.rs"]
mod tests;
