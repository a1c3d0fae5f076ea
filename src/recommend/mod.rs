//! Recommendation systems.
//!
//! Hybrid collaborative filtering over an explicit user × item rating
//! matrix. Four stages run per request:
//!
//! 1. [`RatingMatrix`]: users and items to dense rows/columns, unrated = 0
//! 2. [`LowRankApproximator`]: truncated SVD reconstruction `P`
//! 3. [`ItemSimilarity`]: item × item cosine similarity `S`
//! 4. [`HybridScorer`]: `0.7 · P[u][j] + 0.3 · mean_k(S[j][k] · R[u][k])`, top-N
//!
//! Stages 2 and 3 only read `R` and run concurrently with the `parallel`
//! feature. Nothing is cached between calls.
//!
//! # Quick Start
//!
//! ```
//! use recblend::recommend::{Dataset, HybridRecommender};
//!
//! let data = Dataset::synthetic_movies(42, 0.8).expect("valid density");
//! let recommender = HybridRecommender::default();
//!
//! let recs = recommender
//!     .recommend("alice", &data.users, &data.items, &data.ratings)
//!     .expect("alice is a known user");
//!
//! assert!(recs.len() <= 10);
//! assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
//! ```

mod config;
mod dataset;
mod hybrid;
mod low_rank;
mod rating_matrix;
mod recommender;
mod similarity;
mod types;

pub use config::{
    BlendWeights, DimensionLimits, RankPolicy, RecommenderConfig, DEFAULT_ENERGY,
    DEFAULT_NEIGHBORHOOD_WEIGHT, DEFAULT_PREDICTED_WEIGHT, DEFAULT_SIMILARITY_FALLBACK,
    DEFAULT_TOP_N,
};
pub use dataset::{Dataset, DEFAULT_RATING_DENSITY};
pub use hybrid::{neighborhood_average, rank, HybridScorer};
pub use low_rank::LowRankApproximator;
pub use rating_matrix::RatingMatrix;
pub use recommender::HybridRecommender;
pub use similarity::{cosine_similarity, ItemSimilarity};
pub use types::{Item, Rating, RatingValue, Recommendation, User};
